use std::str::FromStr;
use crate::VRError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub enum VREye {
    Left,
    Right,
}

impl FromStr for VREye {
    type Err = VRError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(VREye::Left),
            "right" => Ok(VREye::Right),
            other => Err(VRError::UnknownEye(other.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eye_names() {
        assert_eq!("left".parse::<VREye>().unwrap(), VREye::Left);
        assert_eq!("right".parse::<VREye>().unwrap(), VREye::Right);
        assert_eq!("center".parse::<VREye>().unwrap_err().to_string(), "unknown eye: center");
    }
}
