#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    #[default]
    Phone,
    Car,
}

impl std::fmt::Display for Pane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pane::Phone => write!(f, "phone"),
            Pane::Car => write!(f, "car"),
        }
    }
}

impl Pane {
    pub fn other(self) -> Pane {
        match self {
            Pane::Phone => Pane::Car,
            Pane::Car => Pane::Phone,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Running,
    Quit,
}
