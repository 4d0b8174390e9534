//! Vessel degrees of freedom and result DOF selections.

use crate::error::{ConfigError, ConfigResult};
use std::fmt;
use std::str::FromStr;

/// Rigid-body degree of freedom of a vessel, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dof {
    Surge,
    Sway,
    Heave,
    Roll,
    Pitch,
    Yaw,
}

impl Dof {
    pub const ALL: [Dof; 6] = [
        Dof::Surge,
        Dof::Sway,
        Dof::Heave,
        Dof::Roll,
        Dof::Pitch,
        Dof::Yaw,
    ];

    /// Lowercase name as written in declarations and case ids.
    pub fn name(self) -> &'static str {
        match self {
            Dof::Surge => "surge",
            Dof::Sway => "sway",
            Dof::Heave => "heave",
            Dof::Roll => "roll",
            Dof::Pitch => "pitch",
            Dof::Yaw => "yaw",
        }
    }

    /// Capitalized name as used in engine property paths.
    pub fn title(self) -> &'static str {
        match self {
            Dof::Surge => "Surge",
            Dof::Sway => "Sway",
            Dof::Heave => "Heave",
            Dof::Roll => "Roll",
            Dof::Pitch => "Pitch",
            Dof::Yaw => "Yaw",
        }
    }
}

impl fmt::Display for Dof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dof {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dof::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::invalid("dof", s, "expected surge, sway, heave, roll, pitch or yaw"))
    }
}

/// Line node/segment result variables requested by `"all"` / `"all dofs"`.
pub const LINE_DOFS: [&str; 6] = ["X", "Y", "Z", "Dynamic Rx", "Dynamic Ry", "Dynamic Rz"];

/// Vessel result variables requested by `"all dofs - dynamic"`.
pub const VESSEL_DYNAMIC_DOFS: [&str; 7] = [
    "Dynamic x",
    "Dynamic y",
    "Dynamic z",
    "Dynamic Rx",
    "Dynamic Ry",
    "Dynamic Rz",
    "Velocity",
];

/// Which result variables to read at an evaluation point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DofSelection {
    /// `"all"` or `"all dofs"`
    All,
    /// `"all dofs - dynamic"`
    AllDynamic,
    /// Explicit variable names, used verbatim
    Explicit(Vec<String>),
}

impl DofSelection {
    /// Parse a sentinel keyword.
    pub fn from_keyword(keyword: &str) -> ConfigResult<Self> {
        match keyword.trim() {
            "all" | "all dofs" => Ok(DofSelection::All),
            "all dofs - dynamic" => Ok(DofSelection::AllDynamic),
            other => Err(ConfigError::invalid(
                "dofs",
                other,
                "expected \"all\", \"all dofs\", \"all dofs - dynamic\" or a list",
            )),
        }
    }

    pub fn explicit<S: Into<String>>(names: impl IntoIterator<Item = S>) -> ConfigResult<Self> {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(ConfigError::invalid("dofs", "[]", "list must not be empty"));
        }
        Ok(DofSelection::Explicit(names))
    }

    pub fn expand(&self) -> Vec<String> {
        match self {
            DofSelection::All => LINE_DOFS.iter().map(|s| s.to_string()).collect(),
            DofSelection::AllDynamic => VESSEL_DYNAMIC_DOFS.iter().map(|s| s.to_string()).collect(),
            DofSelection::Explicit(names) => names.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dof_round_trip_name() {
        for dof in Dof::ALL {
            assert_eq!(dof.name().parse::<Dof>().unwrap(), dof);
        }
        assert_eq!("Heave".parse::<Dof>().unwrap(), Dof::Heave);
        assert!("twist".parse::<Dof>().is_err());
    }

    #[test]
    fn sentinels_expand_to_fixed_lists() {
        assert_eq!(DofSelection::from_keyword("all").unwrap().expand().len(), 6);
        assert_eq!(DofSelection::from_keyword("all dofs").unwrap().expand().len(), 6);
        assert_eq!(
            DofSelection::from_keyword("all dofs - dynamic")
                .unwrap()
                .expand()
                .len(),
            7
        );
        assert!(DofSelection::from_keyword("some").is_err());
    }

    #[test]
    fn explicit_list_is_verbatim() {
        let sel = DofSelection::explicit(["Z", "Dynamic Rx"]).unwrap();
        assert_eq!(sel.expand(), vec!["Z".to_string(), "Dynamic Rx".to_string()]);
        assert!(DofSelection::explicit(Vec::<String>::new()).is_err());
    }
}
