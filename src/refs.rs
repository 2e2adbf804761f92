use pdf_writer::Ref;
use std::collections::HashMap;

/// The types of indirect objects a single-page surface writes, used to keep
/// cross-references stable while the document is assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum RefType {
    Catalog,
    PageTree,
    Page,
    PageContent,
    Font(usize),
    CidFont(usize),
    FontDescriptor(usize),
    FontData(usize),
    ToUnicode(usize),
}

/// Generates and remembers object references on demand.
pub(crate) struct ObjectReferences {
    next: i32,
    map: HashMap<RefType, Ref>,
}

impl ObjectReferences {
    pub fn new() -> ObjectReferences {
        ObjectReferences {
            next: 1,
            map: HashMap::new(),
        }
    }

    /// Generate a reference for the given type. Calling `gen` twice for the
    /// same type returns the already-generated reference.
    pub fn gen(&mut self, rtype: RefType) -> Ref {
        if let Some(r) = self.map.get(&rtype) {
            return *r;
        }
        let r = Ref::new(self.next);
        self.next += 1;
        self.map.insert(rtype, r);
        r
    }
}
