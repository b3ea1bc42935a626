//! Process wide access to the generated [`Swagger`] document.
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::{error::Error, openapi::Swagger};

static GLOBAL_PROVIDER: OnceCell<DocumentProvider> = OnceCell::new();

/// Holds the document served by the handlers.
///
/// The document is immutable once handed to the provider. Clones share the
/// same document so every handler built from a clone sees the exact same value.
///
/// # Examples
///
/// ```rust
/// # use autoswagger::provider::DocumentProvider;
/// let provider = DocumentProvider::from_json(r#"{"swagger": "2.0", "info": {"title": "pets"}}"#)?;
///
/// assert_eq!(provider.get_document().info.title, "pets");
/// # Ok::<(), autoswagger::error::Error>(())
/// ```
#[derive(Clone)]
#[cfg_attr(feature = "debug", derive(Debug))]
pub struct DocumentProvider {
    document: Arc<Swagger>,
}

impl DocumentProvider {
    pub fn new(document: Swagger) -> Self {
        Self {
            document: Arc::new(document),
        }
    }

    /// Parse provider document from JSON, typically a `swagger.json` embedded
    /// into the binary with [`include_str!`].
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// Return the held document. Every call returns the same reference.
    pub fn get_document(&self) -> &Swagger {
        &self.document
    }

    /// Install the provider as the process wide provider returned by [`DocumentProvider::global`].
    ///
    /// Only the first install succeeds, later calls return [`Error::AlreadyInstalled`].
    pub fn install(self) -> Result<&'static DocumentProvider, Error> {
        log::debug!("Installing global document provider");
        GLOBAL_PROVIDER
            .try_insert(self)
            .map_err(|_| Error::AlreadyInstalled)
    }

    pub fn global() -> Option<&'static DocumentProvider> {
        GLOBAL_PROVIDER.get()
    }
}

impl From<Swagger> for DocumentProvider {
    fn from(document: Swagger) -> Self {
        Self::new(document)
    }
}

#[cfg(test)]
mod tests {
    use std::{ptr, thread};

    use super::*;
    use crate::openapi::Info;

    #[test]
    fn from_json_fails_on_malformed_document() {
        let result = DocumentProvider::from_json("{ not json");

        assert!(matches!(result, Err(Error::Serialization(_))));
    }

    #[test]
    fn get_document_returns_same_reference() {
        let provider = DocumentProvider::new(Swagger::new(Info::new("pets", "1")));

        assert!(ptr::eq(provider.get_document(), provider.get_document()));
    }

    #[test]
    fn clones_share_document() {
        let provider = DocumentProvider::new(Swagger::new(Info::new("pets", "1")));
        let cloned = provider.clone();

        assert!(ptr::eq(provider.get_document(), cloned.get_document()));
    }

    #[test]
    fn concurrent_reads_see_same_document() {
        let provider = DocumentProvider::new(Swagger::new(Info::new("pets", "1")));
        let expected = provider.get_document() as *const Swagger as usize;

        thread::scope(|scope| {
            let handles = (0..8)
                .map(|_| {
                    let provider = provider.clone();
                    scope.spawn(move || provider.get_document() as *const Swagger as usize)
                })
                .collect::<Vec<_>>();

            for handle in handles {
                assert_eq!(handle.join().expect("reader thread"), expected);
            }
        });
    }

    #[test]
    fn second_install_fails() {
        let first = DocumentProvider::new(Swagger::new(Info::new("first", "1")));
        let second = DocumentProvider::new(Swagger::new(Info::new("second", "1")));

        let installed = first.install().expect("first install");
        let result = second.install();

        assert_eq!(installed.get_document().info.title, "first");
        assert!(matches!(result, Err(Error::AlreadyInstalled)));
        assert!(DocumentProvider::global().is_some_and(|global| ptr::eq(global, installed)));
    }
}
