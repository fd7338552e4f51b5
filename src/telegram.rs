//! # Telegram Collaborator
//!
//! Narrow view of one received telegram as the payload decoder sees it: the
//! manufacturer-specific byte sequence already isolated from framing and
//! decryption (absent when the telegram carried no manufacturer data), the
//! base offset used to position annotations inside the full frame, and the
//! ordered annotation sink fed during decoding.
//!
//! Framing, link modes and decryption live with the receiving side and are
//! not handled here.

use serde::Serialize;

/// What a decoded byte range contains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AnnotationKind {
    /// Bytes belonging to the telegram envelope
    Protocol,
    /// Bytes carrying meter readings or device state
    Content,
}

/// How well the decoder understood the annotated bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Understanding {
    None,
    Partial,
    Full,
}

/// Diagnostic record tying a payload byte range to a human-readable
/// explanation of what was decoded there
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    /// Byte offset within the full frame
    pub offset: usize,
    /// Length of the explained byte range
    pub length: usize,
    pub kind: AnnotationKind,
    pub understanding: Understanding,
    pub description: String,
}

impl Annotation {
    /// Fully-understood content annotation
    pub fn content(offset: usize, length: usize, description: String) -> Self {
        Self {
            offset,
            length,
            kind: AnnotationKind::Content,
            understanding: Understanding::Full,
            description,
        }
    }
}

/// One received telegram, reduced to the parts the payload decoder consumes
#[derive(Debug, Clone, Default)]
pub struct Telegram {
    header_size: usize,
    mfct_index: Option<usize>,
    mfct_payload: Vec<u8>,
    annotations: Vec<Annotation>,
}

impl Telegram {
    /// Telegram whose manufacturer data section starts `mfct_index` bytes
    /// after a header of `header_size` bytes
    pub fn with_mfct_data(header_size: usize, mfct_index: usize, payload: Vec<u8>) -> Self {
        Self {
            header_size,
            mfct_index: Some(mfct_index),
            mfct_payload: payload,
            annotations: Vec::new(),
        }
    }

    /// Telegram that carries no manufacturer data section
    pub fn without_mfct_data(header_size: usize) -> Self {
        Self {
            header_size,
            mfct_index: None,
            mfct_payload: Vec::new(),
            annotations: Vec::new(),
        }
    }

    /// True when a manufacturer data section is present
    pub fn has_mfct_data(&self) -> bool {
        self.mfct_index.is_some()
    }

    /// Copy of the raw manufacturer data, `None` when absent
    pub fn extract_mfct_data(&self) -> Option<Vec<u8>> {
        self.mfct_index.map(|_| self.mfct_payload.clone())
    }

    /// Frame offset of the first manufacturer data byte, for annotation
    /// positioning
    pub fn mfct_offset(&self) -> usize {
        self.header_size + self.mfct_index.unwrap_or(0)
    }

    /// Record a fully-understood content annotation for a byte range
    pub fn add_special_explanation(&mut self, offset: usize, length: usize, description: String) {
        self.annotations
            .push(Annotation::content(offset, length, description));
    }

    /// Annotations recorded so far, in emission (byte) order
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Consume the telegram, keeping only its annotations
    pub fn into_annotations(self) -> Vec<Annotation> {
        self.annotations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mfct_data_presence() {
        let t = Telegram::with_mfct_data(10, 2, vec![0xAA, 0xBB]);
        assert!(t.has_mfct_data());
        assert_eq!(t.extract_mfct_data(), Some(vec![0xAA, 0xBB]));
        assert_eq!(t.mfct_offset(), 12);

        let t = Telegram::without_mfct_data(10);
        assert!(!t.has_mfct_data());
        assert_eq!(t.extract_mfct_data(), None);
    }

    #[test]
    fn test_annotation_ordering() {
        let mut t = Telegram::with_mfct_data(0, 0, vec![0; 4]);
        t.add_special_explanation(0, 2, "*** 0000 first".to_string());
        t.add_special_explanation(2, 2, "*** 0000 second".to_string());

        let annotations = t.into_annotations();
        assert_eq!(annotations.len(), 2);
        assert_eq!(annotations[0].offset, 0);
        assert_eq!(annotations[1].offset, 2);
        assert_eq!(annotations[0].kind, AnnotationKind::Content);
        assert_eq!(annotations[0].understanding, Understanding::Full);
    }
}
