//! The registered hook entity and its wire representation

/// The only protocol version registering agents may speak.
pub const PROTOCOL_VERSION: i64 = 1;

/// A registered callback hook.
///
/// At most one hook exists at any time; its `id` is the deployment's fixed
/// identifier and never changes once assigned. A successful registration
/// fully replaces any prior hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hook {
    /// Identifier the hook is stored and addressed under.
    pub id: String,

    /// Callback endpoint the registering agent wants invoked.
    pub uri: String,

    /// Protocol version the agent speaks.
    pub version: i64,
}

impl Hook {
    pub fn new(id: impl Into<String>, uri: impl Into<String>, version: i64) -> Self {
        Self {
            id: id.into(),
            uri: uri.into(),
            version,
        }
    }

    /// Self-link embedded in the confirmation document.
    pub fn href(&self) -> String {
        format!("/api/hooks/{}", self.id)
    }

    /// Render the confirmation document.
    ///
    /// This is the exact document returned on creation, persisted by the
    /// store, and echoed back by fetch. Registering agents parse it, so the
    /// element names, nesting, indentation and trailing newline are all
    /// load-bearing.
    pub fn to_xml(&self) -> String {
        format!(
            "<hook id=\"{id}\" href=\"{href}\">\n  <uri>{uri}</uri>\n  <version>{version}</version>\n</hook>\n",
            id = self.id,
            href = self.href(),
            uri = self.uri,
            version = self.version,
        )
    }
}
