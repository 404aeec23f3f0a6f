//! Greedy word-wrapping for fixed-width text columns.
//!
//! Words are separated by single space characters. Each line is filled with
//! as many whole words as fit in `max_width`; a word that does not fit on its
//! own is never split. Every committed line keeps the trailing space it was
//! measured with.

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub text: String,
    pub x: f32,
    pub y: f32,
}

/// Breaks `text` into lines no wider than `max_width` under `measure`,
/// except lines holding a single over-wide word.
pub fn wrap<F>(text: &str, max_width: f32, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let mut lines = Vec::new();
    let mut line = String::new();

    for (n, word) in text.split(' ').enumerate() {
        let candidate = format!("{line}{word} ");
        if measure(&candidate) > max_width && n > 0 {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
            line.push(' ');
        } else {
            line = candidate;
        }
    }
    lines.push(line);
    lines
}

/// Wraps `text` and assigns each line its draw position, starting at `y`
/// and advancing by `line_height`.
pub fn layout<F>(text: &str, x: f32, y: f32, max_width: f32, line_height: f32, measure: F) -> Vec<Line>
where
    F: Fn(&str) -> f32,
{
    wrap(text, max_width, measure)
        .into_iter()
        .enumerate()
        .map(|(i, text)| Line {
            text,
            x,
            y: y + line_height * i as f32,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ten_per_char(s: &str) -> f32 {
        s.chars().count() as f32 * 10.0
    }

    fn words(lines: &[String]) -> Vec<String> {
        lines
            .iter()
            .flat_map(|l| l.strip_suffix(' ').unwrap_or(l).split(' '))
            .map(str::to_string)
            .collect()
    }

    const SAMPLE: &str = "La Maratón se realizó en la Universidad EAFIT y virtualmente los días 18 y 19 de septiembre de 2025";

    #[test]
    fn short_text_stays_on_one_line() {
        assert_eq!(wrap("hola mundo", 200.0, ten_per_char), vec!["hola mundo "]);
    }

    #[test]
    fn lines_respect_width_unless_single_word() {
        for width in [40.0, 80.0, 120.0, 250.0, 600.0] {
            for line in wrap(SAMPLE, width, ten_per_char) {
                let single_word = line.trim_end().split(' ').count() == 1;
                assert!(single_word || ten_per_char(&line) <= width, "{line:?} at {width}");
            }
        }
    }

    #[test]
    fn no_word_is_lost_duplicated_or_reordered() {
        let expected: Vec<String> = SAMPLE.split(' ').map(str::to_string).collect();
        for width in [30.0, 100.0, 175.0, 1000.0] {
            assert_eq!(words(&wrap(SAMPLE, width, ten_per_char)), expected);
        }
    }

    #[test]
    fn wrapping_is_deterministic() {
        assert_eq!(
            wrap(SAMPLE, 150.0, ten_per_char),
            wrap(SAMPLE, 150.0, ten_per_char)
        );
    }

    #[test]
    fn over_wide_word_gets_its_own_line() {
        let lines = wrap("a supercalifragilistic b", 50.0, ten_per_char);
        assert_eq!(lines, vec!["a ", "supercalifragilistic ", "b "]);
    }

    #[test]
    fn over_wide_first_word_is_not_broken_before() {
        let lines = wrap("supercalifragilistic", 50.0, ten_per_char);
        assert_eq!(lines, vec!["supercalifragilistic "]);
    }

    #[test]
    fn empty_text_yields_one_blank_line() {
        assert_eq!(wrap("", 100.0, ten_per_char), vec![" "]);
    }

    #[test]
    fn long_title_lines_are_spaced_by_line_height() {
        let title = "— Ponencia de: \"Una historia larguísima de los corpus digitales en Colombia\"";
        let lines = layout(title, 165.0, 700.0, 300.0, 51.0, ten_per_char);

        assert!(lines.len() > 1);
        for (i, line) in lines.iter().enumerate() {
            assert_eq!(line.x, 165.0);
            assert_eq!(line.y, 700.0 + 51.0 * i as f32);
        }
        let joined: Vec<String> = lines.into_iter().map(|l| l.text).collect();
        assert_eq!(
            words(&joined),
            title.split(' ').map(str::to_string).collect::<Vec<_>>()
        );
    }
}
