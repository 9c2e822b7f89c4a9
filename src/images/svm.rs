//! PostScript recovery from StarView metafiles.
//!
//! Office suites wrap imported EPS files in an SVM whose comment records carry
//! the original PostScript next to a preview rendering.

use crate::common::detection::utils::find_in_buffer;
use memchr::memmem;

const SVM_SIGNATURE: &[u8] = b"VCLMTF";
const EPS_START: &[u8] = b"%!PS-Adobe";
const EPS_END: &[u8] = b"%%EOF";

/// Extract the embedded PostScript program of an SVM, if it carries one
pub fn extract_eps(svm: &[u8]) -> Option<Vec<u8>> {
    if !svm.starts_with(SVM_SIGNATURE) {
        return None;
    }
    let start = find_in_buffer(svm, EPS_START)?;
    let end = memmem::rfind(&svm[start..], EPS_END)? + start + EPS_END.len();
    Some(svm[start..end].to_vec())
}
