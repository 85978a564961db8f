//! Domain ID Types with NewType Pattern
//!
//! Portal identifiers are opaque strings owned by the backing services, so the
//! wrappers never validate their shape. They exist to keep an application id
//! from being passed where an API id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

/// Macro to generate NewType ID wrappers with all required traits
macro_rules! domain_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Get the inner string value
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

domain_id!(
    /// Identifier of a published or private API
    ApiId
);

domain_id!(
    /// Identifier of a consumer application
    ApplicationId
);

domain_id!(
    /// Identifier of a portal user
    UserId
);

domain_id!(
    /// Identifier of a documentation page
    PageId
);

domain_id!(
    /// Identifier of a subscription plan
    PlanId
);

domain_id!(
    /// Identifier of a rating left on an API
    RatingId
);
