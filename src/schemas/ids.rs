//! Identifier newtypes assigned by the workflow store

use serde::{Deserialize, Serialize};

macro_rules! store_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<u64>()
                    .map($name)
                    .map_err(|_| format!("Invalid {}: {}", stringify!($name), s))
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                $name(value)
            }
        }
    };
}

store_id!(
    /// Persisted workflow identifier
    WorkflowId
);
store_id!(
    /// Persisted stage identifier
    StageId
);
store_id!(
    /// Persisted action identifier
    ActionId
);
store_id!(
    /// Role catalog identifier
    RoleId
);
store_id!(
    /// User catalog identifier
    UserId
);
