/// The four frequency channels tracked per position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Nucleotide {
    A,
    C,
    G,
    T,
}

impl Nucleotide {
    pub const ALL: [Nucleotide; 4] = [Nucleotide::A, Nucleotide::C, Nucleotide::G, Nucleotide::T];

    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'A' => Some(Nucleotide::A),
            'C' => Some(Nucleotide::C),
            'G' => Some(Nucleotide::G),
            'T' => Some(Nucleotide::T),
            _ => None,
        }
    }

    pub fn code(self) -> char {
        match self {
            Nucleotide::A => 'A',
            Nucleotide::C => 'C',
            Nucleotide::G => 'G',
            Nucleotide::T => 'T',
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn mean_column(self) -> &'static str {
        match self {
            Nucleotide::A => "A_mean",
            Nucleotide::C => "C_mean",
            Nucleotide::G => "G_mean",
            Nucleotide::T => "T_mean",
        }
    }

    pub fn std_column(self) -> &'static str {
        match self {
            Nucleotide::A => "A_std",
            Nucleotide::C => "C_std",
            Nucleotide::G => "G_std",
            Nucleotide::T => "T_std",
        }
    }
}
