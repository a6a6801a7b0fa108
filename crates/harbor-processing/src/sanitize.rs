/// Characters that are unsafe in a file name on at least one platform.
const RESERVED_CHARS: [char; 10] = ['/', '\\', '?', '%', '*', ':', '|', '"', '<', '>'];

/// Replace path separators and reserved characters with `_`.
///
/// Only the base name is expected here; the extension is appended later
/// from the uploaded file's original name.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| if RESERVED_CHARS.contains(&c) { '_' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replaces_every_reserved_character() {
        assert_eq!(sanitize_file_name(r#"a/b\c?d%e*f:g|h"i<j>k"#), "a_b_c_d_e_f_g_h_i_j_k");
    }

    #[test]
    fn test_path_traversal_is_flattened() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), ".._.._etc_passwd");
    }

    #[test]
    fn test_plain_names_are_untouched() {
        assert_eq!(sanitize_file_name("customFileNameTest"), "customFileNameTest");
        assert_eq!(sanitize_file_name("résumé 2024"), "résumé 2024");
        assert_eq!(sanitize_file_name(""), "");
    }

    #[test]
    fn test_idempotent() {
        let once = sanitize_file_name("my:file?<name>");
        assert_eq!(sanitize_file_name(&once), once);
    }
}
