/// Options controlling how a page dictionary is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOptions {
    /// Accept annotation dictionaries written inline in `/Annots` by
    /// wrapping them in a synthetic container. When disabled, only
    /// references to annotation dictionaries are accepted.
    pub lenient_annotations: bool,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            lenient_annotations: true,
        }
    }
}

impl PageOptions {
    /// Reject anything ISO 32000-1 does not allow.
    pub fn strict() -> Self {
        Self {
            lenient_annotations: false,
        }
    }

    pub fn with_lenient_annotations(mut self, lenient: bool) -> Self {
        self.lenient_annotations = lenient;
        self
    }
}
