//! Hand-written stand-in for the reference dataset.
//!
//! Covers all regions and all cities with county rights, plus a sample of
//! counties and municipalities around the largest agglomerations. Used only
//! when the primary dataset cannot be read.

use crate::unit::{TerritorialUnit, UnitType};

static REGIONS: &[&str] = &[
    "dolnośląskie",
    "kujawsko-pomorskie",
    "lubelskie",
    "lubuskie",
    "łódzkie",
    "małopolskie",
    "mazowieckie",
    "opolskie",
    "podkarpackie",
    "podlaskie",
    "pomorskie",
    "śląskie",
    "świętokrzyskie",
    "warmińsko-mazurskie",
    "wielkopolskie",
    "zachodniopomorskie",
];

/// `(name, region)` pairs.
static COUNTIES: &[(&str, &str)] = &[
    ("Powiat warszawski zachodni", "mazowieckie"),
    ("Powiat piaseczyński", "mazowieckie"),
    ("Powiat pruszkowski", "mazowieckie"),
    ("Powiat wołomiński", "mazowieckie"),
    ("Powiat grodziski", "mazowieckie"),
    ("Powiat krakowski", "małopolskie"),
    ("Powiat wielicki", "małopolskie"),
    ("Powiat myślenicki", "małopolskie"),
    ("Powiat poznański", "wielkopolskie"),
    ("Powiat wrocławski", "dolnośląskie"),
    ("Powiat gdański", "pomorskie"),
    ("Powiat katowicki", "śląskie"),
    ("Powiat bielski", "śląskie"),
    ("Powiat gliwicki", "śląskie"),
    ("Powiat lubliniecki", "śląskie"),
    ("Powiat łódzki wschodni", "łódzkie"),
    ("Powiat rzeszowski", "podkarpackie"),
    ("Powiat białostocki", "podlaskie"),
    ("Powiat szczeciński", "zachodniopomorskie"),
];

static CITIES: &[(&str, &str)] = &[
    ("Warszawa", "mazowieckie"),
    ("Kraków", "małopolskie"),
    ("Wrocław", "dolnośląskie"),
    ("Poznań", "wielkopolskie"),
    ("Gdańsk", "pomorskie"),
    ("Szczecin", "zachodniopomorskie"),
    ("Bydgoszcz", "kujawsko-pomorskie"),
    ("Lublin", "lubelskie"),
    ("Katowice", "śląskie"),
    ("Białystok", "podlaskie"),
    ("Gdynia", "pomorskie"),
    ("Częstochowa", "śląskie"),
    ("Radom", "mazowieckie"),
    ("Sosnowiec", "śląskie"),
    ("Toruń", "kujawsko-pomorskie"),
    ("Kielce", "świętokrzyskie"),
    ("Rzeszów", "podkarpackie"),
    ("Gliwice", "śląskie"),
    ("Zabrze", "śląskie"),
    ("Olsztyn", "warmińsko-mazurskie"),
    ("Bielsko-Biała", "śląskie"),
    ("Bytom", "śląskie"),
    ("Zielona Góra", "lubuskie"),
    ("Rybnik", "śląskie"),
    ("Ruda Śląska", "śląskie"),
    ("Opole", "opolskie"),
    ("Tychy", "śląskie"),
    ("Gorzów Wielkopolski", "lubuskie"),
    ("Elbląg", "warmińsko-mazurskie"),
    ("Dąbrowa Górnicza", "śląskie"),
    ("Płock", "mazowieckie"),
    ("Wałbrzych", "dolnośląskie"),
    ("Włocławek", "kujawsko-pomorskie"),
    ("Tarnów", "małopolskie"),
    ("Chorzów", "śląskie"),
    ("Koszalin", "zachodniopomorskie"),
    ("Kalisz", "wielkopolskie"),
    ("Legnica", "dolnośląskie"),
    ("Grudziądz", "kujawsko-pomorskie"),
    ("Słupsk", "pomorskie"),
    ("Jaworzno", "śląskie"),
    ("Jastrzębie-Zdrój", "śląskie"),
    ("Nowy Sącz", "małopolskie"),
    ("Jelenia Góra", "dolnośląskie"),
    ("Siedlce", "mazowieckie"),
    ("Mysłowice", "śląskie"),
    ("Konin", "wielkopolskie"),
    ("Piotrków Trybunalski", "łódzkie"),
    ("Inowrocław", "kujawsko-pomorskie"),
    ("Lubin", "dolnośląskie"),
    ("Ostrów Wielkopolski", "wielkopolskie"),
    ("Suwałki", "podlaskie"),
    ("Stargard", "zachodniopomorskie"),
    ("Gniezno", "wielkopolskie"),
    ("Głogów", "dolnośląskie"),
    ("Pabianice", "łódzkie"),
    ("Chełm", "lubelskie"),
    ("Zamość", "lubelskie"),
    ("Tomaszów Mazowiecki", "łódzkie"),
    ("Przemyśl", "podkarpackie"),
    ("Stalowa Wola", "podkarpackie"),
    ("Mielec", "podkarpackie"),
    ("Krosno", "podkarpackie"),
    ("Tarnobrzeg", "podkarpackie"),
    ("Łomża", "podlaskie"),
    ("Biała Podlaska", "lubelskie"),
    ("Skierniewice", "łódzkie"),
    ("Sopot", "pomorskie"),
    ("Świnoujście", "zachodniopomorskie"),
];

static MUNICIPALITIES: &[(&str, &str)] = &[
    ("Gmina Lesznowola", "mazowieckie"),
    ("Gmina Konstancin-Jeziorna", "mazowieckie"),
    ("Gmina Michałowice", "mazowieckie"),
    ("Gmina Raszyn", "mazowieckie"),
    ("Gmina Wieliczka", "małopolskie"),
    ("Gmina Zabierzów", "małopolskie"),
    ("Gmina Tarnowo Podgórne", "wielkopolskie"),
    ("Gmina Komorniki", "wielkopolskie"),
    ("Gmina Długołęka", "dolnośląskie"),
    ("Gmina Kobierzyce", "dolnośląskie"),
    ("Gmina Żukowo", "pomorskie"),
    ("Gmina Pruszcz Gdański", "pomorskie"),
];

/// Build the fallback collection: regions, counties, cities, municipalities,
/// in that order.
pub fn fallback_units(context_label: &str) -> Vec<TerritorialUnit> {
    let regions = REGIONS.iter().map(|r| {
        TerritorialUnit::new(
            &format!("Województwo {r}"),
            UnitType::Region,
            None,
            context_label,
        )
    });
    let with_parent = |list: &'static [(&'static str, &'static str)], t: UnitType| {
        list.iter().map(move |(name, region)| {
            TerritorialUnit::new(name, t, Some(*region), context_label)
        })
    };

    regions
        .chain(with_parent(COUNTIES, UnitType::County))
        .chain(with_parent(CITIES, UnitType::City))
        .chain(with_parent(MUNICIPALITIES, UnitType::Municipality))
        .collect()
}
