/// Optimization sense of an objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    Minimize,
    Maximize,
}

impl Sense {
    pub fn as_str(self) -> &'static str {
        match self {
            Sense::Minimize => "minimize",
            Sense::Maximize => "maximize",
        }
    }
}

/// Integrality of a decision variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarType {
    Continuous,
    Integer,
}

impl VarType {
    pub fn as_str(self) -> &'static str {
        match self {
            VarType::Continuous => "continuous",
            VarType::Integer => "integer",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sense_as_str() {
        assert_eq!(Sense::Minimize.as_str(), "minimize");
        assert_eq!(Sense::Maximize.as_str(), "maximize");
    }

    #[test]
    fn var_type_as_str() {
        assert_eq!(VarType::Continuous.as_str(), "continuous");
        assert_eq!(VarType::Integer.as_str(), "integer");
    }
}
