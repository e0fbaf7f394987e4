//! Magic-number signature registry for allowed document types.
//!
//! Maps each declared content type to the byte sequence(s) that must appear
//! in the actual payload, plus the file extensions that normally carry it.
//! The table is static and read-only; lookups are safe from any thread.

/// A run of bytes that must appear at a fixed offset in the buffer.
#[derive(Debug, Clone, Copy)]
pub struct MagicRun {
    pub offset: usize,
    pub bytes: &'static [u8],
}

/// Signature rules and permitted extensions for one declared content type.
///
/// A buffer matches the entry if, for at least one alternative, every
/// [`MagicRun`] of that alternative matches byte-for-byte.
#[derive(Debug, Clone, Copy)]
pub struct SignatureEntry {
    pub declared_type: &'static str,
    /// Alternative signatures (e.g. GIF87a vs GIF89a).
    pub signatures: &'static [&'static [MagicRun]],
    /// Extensions that normally carry this type, lowercase.
    pub extensions: &'static [&'static str],
    /// Whether inline browser preview is considered safe for this type.
    pub previewable: bool,
}

impl SignatureEntry {
    /// Compare the buffer against this entry's signature alternatives.
    ///
    /// A buffer shorter than a required run never matches; it is treated as
    /// a mismatch, not an error.
    pub fn matches(&self, buffer: &[u8]) -> bool {
        self.signatures.iter().any(|alternative| {
            alternative.iter().all(|run| {
                buffer
                    .get(run.offset..run.offset + run.bytes.len())
                    .is_some_and(|window| window == run.bytes)
            })
        })
    }
}

// %PDF
const PDF: &[MagicRun] = &[MagicRun { offset: 0, bytes: &[0x25, 0x50, 0x44, 0x46] }];

const JPEG: &[MagicRun] = &[MagicRun { offset: 0, bytes: &[0xFF, 0xD8, 0xFF] }];

const PNG: &[MagicRun] = &[MagicRun {
    offset: 0,
    bytes: &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A],
}];

const GIF_87A: &[MagicRun] = &[MagicRun { offset: 0, bytes: b"GIF87a" }];
const GIF_89A: &[MagicRun] = &[MagicRun { offset: 0, bytes: b"GIF89a" }];

// RIFF container with the WEBP fourcc at offset 8; both runs must hold.
const WEBP: &[MagicRun] = &[
    MagicRun { offset: 0, bytes: b"RIFF" },
    MagicRun { offset: 8, bytes: b"WEBP" },
];

// Legacy Word: OLE compound document header.
const DOC: &[MagicRun] = &[MagicRun {
    offset: 0,
    bytes: &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1],
}];

// DOCX: ZIP local-file header. Shared by every ZIP-based container; the
// validator trusts the declared type rather than inspecting ZIP internals.
const DOCX: &[MagicRun] = &[MagicRun { offset: 0, bytes: &[0x50, 0x4B, 0x03, 0x04] }];

/// The fixed registry of allowed declared types.
pub const REGISTRY: &[SignatureEntry] = &[
    SignatureEntry {
        declared_type: "application/pdf",
        signatures: &[PDF],
        extensions: &["pdf"],
        previewable: true,
    },
    SignatureEntry {
        declared_type: "image/jpeg",
        signatures: &[JPEG],
        extensions: &["jpg", "jpeg"],
        previewable: true,
    },
    SignatureEntry {
        declared_type: "image/jpg",
        signatures: &[JPEG],
        extensions: &["jpg", "jpeg"],
        previewable: true,
    },
    SignatureEntry {
        declared_type: "image/png",
        signatures: &[PNG],
        extensions: &["png"],
        previewable: true,
    },
    SignatureEntry {
        declared_type: "image/gif",
        signatures: &[GIF_87A, GIF_89A],
        extensions: &["gif"],
        previewable: true,
    },
    SignatureEntry {
        declared_type: "image/webp",
        signatures: &[WEBP],
        extensions: &["webp"],
        previewable: true,
    },
    SignatureEntry {
        declared_type: "application/msword",
        signatures: &[DOC],
        extensions: &["doc"],
        previewable: false,
    },
    SignatureEntry {
        declared_type: "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        signatures: &[DOCX],
        extensions: &["docx"],
        previewable: false,
    },
];

/// Look up the signature entry for a declared type.
///
/// Returns `None` for any type outside the fixed registry. Callers must
/// treat `None` as a rejection, never as "skip validation".
pub fn lookup(declared_type: &str) -> Option<&'static SignatureEntry> {
    REGISTRY
        .iter()
        .find(|entry| entry.declared_type == declared_type)
}
