use thiserror::Error;

#[derive(Error, Debug)]
pub enum LocatorError {
    /// The store could not list the schools. Displays the store's own message.
    #[error(transparent)]
    Store(#[from] database::StoreError),
}
