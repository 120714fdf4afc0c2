//! Built-in transpiler passes

mod basis_translation;
mod cancel_inverses;
mod commute_diagonal;
mod merge_rotations;
mod remove_identities;

pub use basis_translation::{BasisTranslation, IBM_BASIS};
pub use cancel_inverses::CancelInverses;
pub use commute_diagonal::CommuteDiagonal;
pub use merge_rotations::MergeRotations;
pub use remove_identities::RemoveIdentities;
