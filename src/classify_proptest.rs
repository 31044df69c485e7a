//! Property-based tests for archive member classification and remote URL
//! normalization.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use std::collections::BTreeSet;

    use crate::git::normalize_remote_url;
    use crate::phases::extract::classify_member;
    use proptest::prelude::*;

    fn requested(names: &[String]) -> BTreeSet<String> {
        names.iter().cloned().collect()
    }

    // ============================================================================
    // classify_member property tests
    // ============================================================================

    proptest! {
        /// Property: a requested single-file library always classifies to `<name>.mpy`
        #[test]
        fn single_file_library_is_found(
            root in "[a-z0-9.-]{1,30}",
            name in "[a-z_][a-z0-9_]{0,20}",
        ) {
            let member = format!("{}/lib/{}.mpy", root, name);
            let result = classify_member(&member, &requested(&[name.clone()]));
            prop_assert!(result.is_some());
            let result = result.unwrap();
            prop_assert_eq!(result.name, name.clone());
            prop_assert_eq!(result.relative_path, format!("{}.mpy", name));
        }

        /// Property: package members keep everything below `lib/`
        #[test]
        fn package_member_strips_two_segments(
            root in "[a-z0-9.-]{1,30}",
            name in "[a-z_][a-z0-9_]{0,20}",
            rest in "[a-z0-9_]{1,10}(/[a-z0-9_]{1,10}){0,3}\\.mpy",
        ) {
            let member = format!("{}/lib/{}/{}", root, name, rest);
            let result = classify_member(&member, &requested(&[name.clone()])).unwrap();
            prop_assert_eq!(result.relative_path, format!("{}/{}", name, rest));
        }

        /// Property: names that were not requested never classify
        #[test]
        fn unrequested_names_never_match(
            name in "[a-z]{1,12}",
            other in "[A-Z]{1,12}",
        ) {
            let file = format!("bundle/lib/{}.mpy", name);
            let dir = format!("bundle/lib/{}/x.mpy", name);
            let wanted = requested(&[other]);
            prop_assert!(classify_member(&file, &wanted).is_none());
            prop_assert!(classify_member(&dir, &wanted).is_none());
        }

        /// Property: a classified relative path is always a suffix of the member path
        #[test]
        fn relative_path_is_suffix(member in "[a-z]{1,5}/lib/[a-z]{1,5}(\\.mpy|/[a-z/]{0,10})") {
            let name = member.split('/').nth(2).unwrap().trim_end_matches(".mpy").to_string();
            if let Some(result) = classify_member(&member, &requested(&[name])) {
                prop_assert!(member.ends_with(&result.relative_path));
            }
        }
    }

    // ============================================================================
    // normalize_remote_url property tests
    // ============================================================================

    proptest! {
        /// Property: SSH GitHub remotes always normalize to https without `.git`
        #[test]
        fn ssh_remote_normalizes(org in "[a-zA-Z0-9-]{1,20}", repo in "[a-zA-Z0-9_-]{1,20}") {
            let remote = format!("git@github.com:{}/{}.git", org, repo);
            prop_assert_eq!(
                normalize_remote_url(&remote),
                format!("https://github.com/{}/{}", org, repo)
            );
        }

        /// Property: normalization is idempotent
        #[test]
        fn normalization_is_idempotent(remote in "[!-~]{0,60}") {
            let once = normalize_remote_url(&remote);
            let twice = normalize_remote_url(&once);
            // Only a doubled `.git.git` suffix can change on the second pass
            if !remote.ends_with(".git.git") {
                prop_assert_eq!(once, twice);
            }
        }
    }
}
