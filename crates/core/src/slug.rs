//! URL slug helpers.

/// Turns free text into a lowercase ASCII slug.
///
/// Turkish and German letters are transliterated; every other run of
/// non-alphanumeric characters becomes a single `-`.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.chars() {
        let mapped: &str = match c {
            'ç' | 'Ç' => "c",
            'ğ' | 'Ğ' => "g",
            'ı' | 'I' | 'İ' | 'i' => "i",
            'ö' | 'Ö' => "o",
            'ş' | 'Ş' => "s",
            'ü' | 'Ü' => "u",
            'ä' | 'Ä' => "a",
            'ß' => "ss",
            _ => "",
        };

        if !mapped.is_empty() {
            push_part(&mut slug, mapped, &mut pending_dash);
        } else if c.is_ascii_alphanumeric() {
            let lower = c.to_ascii_lowercase();
            push_part(&mut slug, lower.encode_utf8(&mut [0; 4]), &mut pending_dash);
        } else {
            pending_dash = true;
        }
    }

    slug
}

fn push_part(slug: &mut String, part: &str, pending_dash: &mut bool) {
    if *pending_dash && !slug.is_empty() {
        slug.push('-');
    }
    *pending_dash = false;
    slug.push_str(part);
}

/// Returns true for `a-z0-9` words joined by single dashes.
#[must_use]
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.len() <= 191
        && slug
            .split('-')
            .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("Villa Projesi 2024", "villa-projesi-2024")]
    #[case("Çağdaş İç Mimarlık", "cagdas-ic-mimarlik")]
    #[case("  --Hello,   World!--  ", "hello-world")]
    #[case("Straße & Größe", "strasse-grosse")]
    #[case("", "")]
    fn slugifies(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(slugify(input), expected);
    }

    #[rstest]
    #[case("villa-a", true)]
    #[case("a1-b2-c3", true)]
    #[case("Villa", false)]
    #[case("villa--a", false)]
    #[case("-villa", false)]
    #[case("", false)]
    fn validates(#[case] slug: &str, #[case] expected: bool) {
        assert_eq!(is_valid_slug(slug), expected);
    }

    #[test]
    fn slugify_output_is_valid() {
        assert!(is_valid_slug(&slugify("Büyük Ödül: Şehir Parkı")));
    }
}
