//! Container kind enumeration.

/// The physical layout of an ODF document stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    /// A zip package with separate content, styles and meta parts
    Package,
    /// A single XML stream (`.fodt`, `.fods`, `.fodp`) holding every part inline
    FlatXml,
}
