//! Built-in XHTML doctype catalogue.

use crate::convert::DoctypeTable;

/// One selectable output doctype.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Doctype {
    /// Key callers use to select it (`type=strict`).
    pub key: &'static str,
    /// Formal public identifier.
    pub public_id: &'static str,
    /// DTD location.
    pub system_id: &'static str,
}

impl Doctype {
    /// `<!DOCTYPE html PUBLIC "..." "...">` for this entry.
    pub fn declaration(&self) -> String {
        format!(
            "<!DOCTYPE html\n   PUBLIC \"{}\"\n   \"{}\">\n",
            self.public_id, self.system_id
        )
    }
}

pub static DOCTYPES: &[Doctype] = &[
    Doctype {
        key: "transitional",
        public_id: "-//W3C//DTD XHTML 1.0 Transitional//EN",
        system_id: "http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd",
    },
    Doctype {
        key: "strict",
        public_id: "-//W3C//DTD XHTML 1.0 Strict//EN",
        system_id: "http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd",
    },
    Doctype {
        key: "frameset",
        public_id: "-//W3C//DTD XHTML 1.0 Frameset//EN",
        system_id: "http://www.w3.org/TR/xhtml1/DTD/xhtml1-frameset.dtd",
    },
    Doctype {
        key: "1.1",
        public_id: "-//W3C//DTD XHTML 1.1//EN",
        system_id: "http://www.w3.org/TR/xhtml11/DTD/xhtml11.dtd",
    },
    Doctype {
        key: "basic-1.0",
        public_id: "-//W3C//DTD XHTML Basic 1.0//EN",
        system_id: "http://www.w3.org/TR/xhtml-basic/xhtml-basic10.dtd",
    },
    Doctype {
        key: "basic-1.1",
        public_id: "-//W3C//DTD XHTML Basic 1.1//EN",
        system_id: "http://www.w3.org/TR/xhtml-basic/xhtml-basic11.dtd",
    },
    Doctype {
        key: "print-1.0",
        public_id: "-//W3C//DTD XHTML-Print 1.0//EN",
        system_id: "http://www.w3.org/MarkUp/DTD/xhtml-print10.dtd",
    },
    Doctype {
        key: "mp",
        public_id: "-//WAPFORUM//DTD XHTML Mobile 1.0//EN",
        system_id: "http://www.wapforum.org/DTD/xhtml-mobile10.dtd",
    },
    Doctype {
        key: "mp-1.1",
        public_id: "-//WAPFORUM//DTD XHTML Mobile 1.1//EN",
        system_id: "http://www.openmobilealliance.org/tech/DTD/xhtml-mobile11.dtd",
    },
    Doctype {
        key: "mp-1.2",
        public_id: "-//WAPFORUM//DTD XHTML Mobile 1.2//EN",
        system_id: "http://www.openmobilealliance.org/tech/DTD/xhtml-mobile12.dtd",
    },
];

/// [`DoctypeTable`] over [`DOCTYPES`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticDoctypes;

impl DoctypeTable for StaticDoctypes {
    fn lookup(&self, key: &[u8]) -> Option<usize> {
        DOCTYPES.iter().position(|d| d.key.as_bytes() == key)
    }

    fn get(&self, index: usize) -> Option<&Doctype> {
        DOCTYPES.get(index)
    }
}
