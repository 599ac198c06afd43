//! Periodic table data used to resolve element symbols and standard valences.

use ElementGroup::*;

/// Block of the periodic table an element belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementGroup {
    /// Alkali metal
    Alkali,
    /// Alkaline earth metal
    AlkEar,
    /// Transition metal
    Trans,
    /// Post-transition metal
    Poor,
    /// Metalloid
    Metoid,
    /// Nonmetal
    Nonmet,
    /// Halogen
    Halogn,
    /// Noble gas
    Noble,
    /// Lanthanide or actinide
    RarEar,
}

#[derive(Debug, Clone, Copy)]
pub struct Element {
    pub symbol: &'static str,
    pub name: &'static str,
    pub mass: f32,
    pub group: ElementGroup,
    /// Neutral standard valences in ascending order, empty if the element has none.
    pub valences: &'static [u8],
}
impl Element {
    pub const fn new(
        symbol: &'static str,
        name: &'static str,
        mass: f32,
        group: ElementGroup,
        valences: &'static [u8],
    ) -> Self {
        Self {
            symbol,
            name,
            mass,
            group,
            valences,
        }
    }

    /// Look up an element by its atomic number.
    #[inline]
    pub fn get(atomic_number: u8) -> Option<&'static Self> {
        ELEMENTS.get(atomic_number as usize)
    }

    /// Resolve a case-sensitive element symbol to an atomic number.
    ///
    /// Lowercase aromatic spellings of the organic subset (`c`, `n`, `o`, ...) are accepted too.
    pub fn atomic_number(symbol: &str) -> Option<u8> {
        let found = ELEMENTS
            .iter()
            .skip(1)
            .position(|e| e.symbol == symbol)
            .map(|i| i as u8 + 1);
        found.or_else(|| match symbol {
            "b" => Some(5),
            "c" => Some(6),
            "n" => Some(7),
            "o" => Some(8),
            "p" => Some(15),
            "s" => Some(16),
            "se" => Some(34),
            "as" => Some(33),
            _ => None,
        })
    }

    /// Standard valences of an element adjusted for a formal charge.
    ///
    /// Boron, carbon and silicon lose a bond per unit of charge either way, everything else
    /// gains one per positive charge.
    pub fn charged_valences(atomic_number: u8, charge: i32) -> impl Iterator<Item = u8> {
        let valences = Self::get(atomic_number).map_or(&[][..], |e| e.valences);
        let electron_poor = matches!(atomic_number, 5 | 6 | 14);
        valences.iter().filter_map(move |&v| {
            let v = v as i32;
            let adjusted = if electron_poor {
                v - charge.abs()
            } else {
                v + charge
            };
            u8::try_from(adjusted).ok()
        })
    }
}

/// Every element, indexed by atomic number. Index 0 is a placeholder for unknown atoms.
pub static ELEMENTS: &[Element] = &[
    Element::new("R",  "unknown",       0.0000,  Nonmet, &[]),
    Element::new("H",  "hydrogen",      1.0078,  Nonmet, &[1]),
    Element::new("He", "helium",        4.0026,  Noble,  &[]),
    Element::new("Li", "lithium",       6.9410,  Alkali, &[]),
    Element::new("Be", "beryllium",     9.0122,  AlkEar, &[]),
    Element::new("B",  "boron",         10.811,  Metoid, &[3]),
    Element::new("C",  "carbon",        12.011,  Nonmet, &[4]),
    Element::new("N",  "nitrogen",      14.007,  Nonmet, &[3, 5]),
    Element::new("O",  "oxygen",        15.999,  Nonmet, &[2]),
    Element::new("F",  "fluorine",      18.998,  Halogn, &[1]),
    Element::new("Ne", "neon",          20.180,  Noble,  &[]),
    Element::new("Na", "sodium",        22.990,  Alkali, &[]),
    Element::new("Mg", "magnesium",     24.305,  AlkEar, &[]),
    Element::new("Al", "aluminum",      26.982,  Poor,   &[]),
    Element::new("Si", "silicon",       28.086,  Metoid, &[4]),
    Element::new("P",  "phosphorus",    30.974,  Nonmet, &[3, 5]),
    Element::new("S",  "sulfur",        32.065,  Nonmet, &[2, 4, 6]),
    Element::new("Cl", "chlorine",      35.453,  Halogn, &[1]),
    Element::new("Ar", "argon",         39.948,  Noble,  &[]),
    Element::new("K",  "potassium",     39.098,  Alkali, &[]),
    Element::new("Ca", "calcium",       40.078,  AlkEar, &[]),
    Element::new("Sc", "scandium",      44.956,  Trans,  &[]),
    Element::new("Ti", "titanium",      47.867,  Trans,  &[]),
    Element::new("V",  "vanadium",      50.942,  Trans,  &[]),
    Element::new("Cr", "chromium",      51.996,  Trans,  &[]),
    Element::new("Mn", "manganese",     54.938,  Trans,  &[]),
    Element::new("Fe", "iron",          55.845,  Trans,  &[]),
    Element::new("Co", "cobalt",        58.933,  Trans,  &[]),
    Element::new("Ni", "nickel",        58.693,  Trans,  &[]),
    Element::new("Cu", "copper",        63.546,  Trans,  &[]),
    Element::new("Zn", "zinc",          65.380,  Trans,  &[]),
    Element::new("Ga", "gallium",       69.723,  Poor,   &[]),
    Element::new("Ge", "germanium",     72.640,  Metoid, &[4]),
    Element::new("As", "arsenic",       74.992,  Metoid, &[3, 5]),
    Element::new("Se", "selenium",      78.960,  Nonmet, &[2, 4, 6]),
    Element::new("Br", "bromine",       79.904,  Halogn, &[1]),
    Element::new("Kr", "krypton",       83.798,  Noble,  &[]),
    Element::new("Rb", "rubidium",      85.468,  Alkali, &[]),
    Element::new("Sr", "strontium",     87.620,  AlkEar, &[]),
    Element::new("Y",  "yttrium",       88.906,  Trans,  &[]),
    Element::new("Zr", "zirconium",     91.224,  Trans,  &[]),
    Element::new("Nb", "niobium",       92.906,  Trans,  &[]),
    Element::new("Mo", "molybdenum",    95.950,  Trans,  &[]),
    Element::new("Tc", "technetium",    98.000,  Trans,  &[]),
    Element::new("Ru", "ruthenium",     101.07,  Trans,  &[]),
    Element::new("Rh", "rhodium",       102.91,  Trans,  &[]),
    Element::new("Pd", "palladium",     106.42,  Trans,  &[]),
    Element::new("Ag", "silver",        107.87,  Trans,  &[]),
    Element::new("Cd", "cadmium",       112.41,  Trans,  &[]),
    Element::new("In", "indium",        114.82,  Poor,   &[]),
    Element::new("Sn", "tin",           118.71,  Poor,   &[]),
    Element::new("Sb", "antimony",      121.76,  Metoid, &[]),
    Element::new("Te", "tellurium",     127.60,  Metoid, &[2, 4, 6]),
    Element::new("I",  "iodine",        126.90,  Halogn, &[1, 3, 5, 7]),
    Element::new("Xe", "xenon",         131.29,  Noble,  &[]),
    Element::new("Cs", "cesium",        132.91,  Alkali, &[]),
    Element::new("Ba", "barium",        137.33,  AlkEar, &[]),
    Element::new("La", "lanthanum",     138.91,  RarEar, &[]),
    Element::new("Ce", "cerium",        140.12,  RarEar, &[]),
    Element::new("Pr", "praseodymium",  140.91,  RarEar, &[]),
    Element::new("Nd", "neodymium",     144.24,  RarEar, &[]),
    Element::new("Pm", "prometheum",    145.00,  RarEar, &[]),
    Element::new("Sm", "samarium",      150.36,  RarEar, &[]),
    Element::new("Eu", "europium",      151.96,  RarEar, &[]),
    Element::new("Gd", "gadolinium",    157.25,  RarEar, &[]),
    Element::new("Tb", "terbium",       158.93,  RarEar, &[]),
    Element::new("Dy", "dysprosium",    162.50,  RarEar, &[]),
    Element::new("Ho", "holmium",       164.93,  RarEar, &[]),
    Element::new("Er", "erbium",        167.26,  RarEar, &[]),
    Element::new("Tm", "thulium",       168.93,  RarEar, &[]),
    Element::new("Yb", "ytterbium",     173.04,  RarEar, &[]),
    Element::new("Lu", "lutetium",      174.97,  RarEar, &[]),
    Element::new("Hf", "hafnium",       178.49,  Trans,  &[]),
    Element::new("Ta", "tantalum",      180.95,  Trans,  &[]),
    Element::new("W",  "tungsten",      183.84,  Trans,  &[]),
    Element::new("Re", "rhenium",       186.21,  Trans,  &[]),
    Element::new("Os", "osmium",        190.23,  Trans,  &[]),
    Element::new("Ir", "iridium",       192.22,  Trans,  &[]),
    Element::new("Pt", "platinum",      195.08,  Trans,  &[]),
    Element::new("Au", "gold",          196.97,  Trans,  &[]),
    Element::new("Hg", "mercury",       200.59,  Trans,  &[]),
    Element::new("Tl", "thallium",      204.38,  Poor,   &[]),
    Element::new("Pb", "lead",          207.20,  Poor,   &[]),
    Element::new("Bi", "bismuth",       208.98,  Poor,   &[]),
    Element::new("Po", "polonium",      209.00,  Poor,   &[]),
    Element::new("At", "astatine",      210.00,  Halogn, &[1]),
    Element::new("Rn", "radon",         222.00,  Noble,  &[]),
    Element::new("Fr", "francium",      223.00,  Alkali, &[]),
    Element::new("Ra", "radium",        226.00,  AlkEar, &[]),
    Element::new("Ac", "actinium",      227.00,  RarEar, &[]),
    Element::new("Th", "thorium",       232.04,  RarEar, &[]),
    Element::new("Pa", "protactinium",  231.04,  RarEar, &[]),
    Element::new("U",  "uranium",       238.03,  RarEar, &[]),
    Element::new("Np", "neptunium",     237.05,  RarEar, &[]),
    Element::new("Pu", "plutonium",     244.00,  RarEar, &[]),
    Element::new("Am", "americium",     243.00,  RarEar, &[]),
    Element::new("Cm", "curium",        247.00,  RarEar, &[]),
    Element::new("Bk", "berkelium",     247.00,  RarEar, &[]),
    Element::new("Cf", "californium",   251.00,  RarEar, &[]),
    Element::new("Es", "einsteinium",   252.00,  RarEar, &[]),
    Element::new("Fm", "fermium",       257.00,  RarEar, &[]),
    Element::new("Md", "mendelvium",    258.00,  RarEar, &[]),
    Element::new("No", "nobelium",      259.00,  RarEar, &[]),
    Element::new("Lr", "lawrencium",    262.00,  RarEar, &[]),
    Element::new("Rf", "rutherfordium", 267.00,  Trans,  &[]),
    Element::new("Db", "dubnium",       262.00,  Trans,  &[]),
    Element::new("Sg", "seaborgium",    269.00,  Trans,  &[]),
    Element::new("Bh", "bohrium",       264.00,  Trans,  &[]),
    Element::new("Hs", "hassium",       269.00,  Trans,  &[]),
    Element::new("Mt", "meitnerium",    278.00,  Trans,  &[]),
    Element::new("Ds", "darmstadtium",  281.00,  Trans,  &[]),
    Element::new("Rg", "roentgenium",   282.00,  Trans,  &[]),
    Element::new("Cn", "copernicium",   285.00,  Trans,  &[]),
    Element::new("Nh", "nihonium",      286.00,  Poor,   &[]),
    Element::new("Fl", "flerovium",     289.00,  Poor,   &[]),
    Element::new("Mc", "moscovium",     289.00,  Poor,   &[]),
    Element::new("Lv", "livermorium",   293.00,  Poor,   &[]),
    Element::new("Ts", "tenessine",     294.00,  Halogn, &[]),
    Element::new("Og", "oganesson",     294.00,  Noble,  &[]),
];
