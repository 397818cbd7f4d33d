//! Cart store errors.

use thiserror::Error;
use vitrine::cart::CartError;

use crate::api::ApiError;

/// Errors surfaced by the cart state holder.
#[derive(Debug, Error)]
pub enum CartStoreError {
    /// The cart could not be loaded; previous local state is untouched.
    #[error("could not load the cart")]
    Load(#[source] ApiError),

    /// A removal was refused by the backend; the line is still in the cart.
    #[error("could not remove cart line {line_id}")]
    Remove {
        /// The line the removal targeted.
        line_id: String,

        /// The backend failure.
        #[source]
        source: ApiError,
    },

    /// A local cart rule was violated (unknown line, bad quantity).
    #[error(transparent)]
    Cart(#[from] CartError),
}
