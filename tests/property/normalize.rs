use proptest::prelude::*;
use reqwatch::detect::{Fingerprint, normalize};
use reqwatch::types::HashAlgorithm;

// Requirement-ish lines without line breaks; may contain surrounding spaces.
fn requirement_line() -> impl Strategy<Value = String> {
    "[ \t]{0,2}[a-zA-Z0-9][a-zA-Z0-9_.=<>!~-]{0,15}[ \t]{0,2}"
}

fn comment_line() -> impl Strategy<Value = String> {
    "[ \t]{0,2}#[ -~]{0,20}"
}

fn blank_line() -> impl Strategy<Value = String> {
    "[ \t]{0,3}"
}

proptest! {
    #[test]
    fn normalize_is_idempotent(lines in proptest::collection::vec(
        prop_oneof![requirement_line(), comment_line(), blank_line()],
        0..20,
    )) {
        let text = lines.join("\n");
        let once = normalize(&text);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn normalize_ignores_line_order(
        (lines, shuffled) in proptest::collection::vec(requirement_line(), 0..20)
            .prop_flat_map(|lines| {
                let shuffled = Just(lines.clone()).prop_shuffle();
                (Just(lines), shuffled)
            })
    ) {
        prop_assert_eq!(normalize(&lines.join("\n")), normalize(&shuffled.join("\n")));
    }

    #[test]
    fn normalize_ignores_comments_and_blanks(
        lines in proptest::collection::vec(requirement_line(), 0..10),
        noise in proptest::collection::vec(prop_oneof![comment_line(), blank_line()], 0..10),
        trailing_newline in any::<bool>(),
    ) {
        let mut noisy: Vec<String> = Vec::new();
        for (i, line) in lines.iter().enumerate() {
            if let Some(n) = noise.get(i) {
                noisy.push(n.clone());
            }
            noisy.push(line.clone());
        }
        noisy.extend(noise.iter().skip(lines.len()).cloned());
        let mut noisy = noisy.join("\n");
        if trailing_newline {
            noisy.push('\n');
        }

        prop_assert_eq!(normalize(&noisy), normalize(&lines.join("\n")));
    }

    #[test]
    fn equal_normal_forms_have_equal_fingerprints(
        lines in proptest::collection::vec(requirement_line(), 0..10),
    ) {
        let mut reversed = lines.clone();
        reversed.reverse();
        reversed.push("# trailing comment".to_string());

        for algorithm in [HashAlgorithm::Blake3, HashAlgorithm::Sha256] {
            prop_assert_eq!(
                Fingerprint::of_content(algorithm, &lines.join("\n")),
                Fingerprint::of_content(algorithm, &reversed.join("\r\n"))
            );
        }
    }
}
