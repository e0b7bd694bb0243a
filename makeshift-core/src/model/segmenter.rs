/// Characters that may end a sentence.
const TERMINATORS: [char; 3] = ['.', '!', '?'];

/// Characters allowed to trail a terminator inside the same sentence.
const CLOSERS: [char; 6] = ['"', '\'', ')', ']', '\u{201D}', '\u{2019}'];

/// Characters allowed to open the next sentence.
const OPENERS: [char; 5] = ['"', '\'', '(', '\u{201C}', '\u{2018}'];

/// Lowercased abbreviations whose trailing dot never ends a sentence.
const ABBREVIATIONS: [&str; 13] = [
	"mr", "mrs", "ms", "dr", "st", "jr", "sr", "prof", "rev", "gen", "capt", "mt", "vs",
];

/// Splits a text into sentences.
///
/// A boundary is placed after a run of `.`, `!`, `?` (and closing quotes
/// or brackets) when it is followed by whitespace and then an uppercase
/// letter, a digit or an opening quote, or when it ends the text.
///
/// # Notes
/// - Dots after a known abbreviation (`Mr.`, `Dr.`...) or a single capital
///   initial (`J.`) do not split.
/// - Sentences are trimmed; empty fragments are dropped.
/// - Text after the last terminator is kept as a final sentence.
pub fn split_sentences(text: &str) -> Vec<String> {
	let chars: Vec<(usize, char)> = text.char_indices().collect();
	let mut sentences = Vec::new();
	let mut start = 0;
	let mut i = 0;

	while i < chars.len() {
		if !TERMINATORS.contains(&chars[i].1) {
			i += 1;
			continue;
		}

		// Swallow runs like "?!" or '."'
		let mut j = i + 1;
		while j < chars.len() && (TERMINATORS.contains(&chars[j].1) || CLOSERS.contains(&chars[j].1)) {
			j += 1;
		}

		if ends_sentence(text, &chars, i, j) {
			let end = chars.get(j).map_or(text.len(), |(byte, _)| *byte);
			push_trimmed(&mut sentences, &text[start..end]);
			start = end;
		}
		i = j;
	}
	push_trimmed(&mut sentences, &text[start..]);

	sentences
}

/// Lowercased word tokens of `text`.
///
/// Words are runs of alphanumeric characters and inner apostrophes.
pub fn words(text: &str) -> impl Iterator<Item = String> + '_ {
	text.split(|c: char| !(c.is_alphanumeric() || c == '\''))
		.map(|w| w.trim_matches('\''))
		.filter(|w| !w.is_empty())
		.map(str::to_lowercase)
}

/// Checks whether the terminator run `chars[i..j]` closes a sentence.
fn ends_sentence(text: &str, chars: &[(usize, char)], i: usize, j: usize) -> bool {
	if j == chars.len() {
		return true;
	}
	if !chars[j].1.is_whitespace() {
		return false;
	}

	let next = chars[j..].iter().map(|(_, c)| *c).find(|c| !c.is_whitespace());
	match next {
		None => true,
		Some(n) if n.is_uppercase() || n.is_ascii_digit() || OPENERS.contains(&n) => {
			chars[i].1 != '.' || !is_abbreviation(text, chars[i].0)
		}
		Some(_) => false,
	}
}

/// Checks whether the word right before the dot at byte `dot` is an abbreviation.
fn is_abbreviation(text: &str, dot: usize) -> bool {
	let word = text[..dot].rsplit(char::is_whitespace).next().unwrap_or_default();
	let word = word.trim_start_matches(|c: char| OPENERS.contains(&c));

	let mut letters = word.chars();
	let single_initial = matches!((letters.next(), letters.next()), (Some(c), None) if c.is_uppercase());

	single_initial || ABBREVIATIONS.contains(&word.to_lowercase().as_str())
}

fn push_trimmed(sentences: &mut Vec<String>, fragment: &str) {
	let fragment = fragment.trim();
	if !fragment.is_empty() {
		sentences.push(fragment.to_owned());
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn splits_on_terminators() {
		let sentences = split_sentences("It rained. Did it? Yes! 3 days later it stopped.");
		assert_eq!(sentences, vec!["It rained.", "Did it?", "Yes!", "3 days later it stopped."]);
	}

	#[test]
	fn keeps_abbreviations_and_initials() {
		let sentences = split_sentences("Mr. Conwell met Dr. Smith and J. Doe. They talked.");
		assert_eq!(sentences, vec!["Mr. Conwell met Dr. Smith and J. Doe.", "They talked."]);
	}

	#[test]
	fn closing_quotes_stay_with_the_sentence() {
		let sentences = split_sentences("He said \"go.\" She went.");
		assert_eq!(sentences, vec!["He said \"go.\"", "She went."]);
	}

	#[test]
	fn lowercase_continuation_does_not_split() {
		let sentences = split_sentences("Acres of diamonds, e.g. gold. more text");
		assert_eq!(sentences, vec!["Acres of diamonds, e.g. gold. more text"]);
	}

	#[test]
	fn trailing_fragment_and_blank_input() {
		assert_eq!(split_sentences("One. two without end"), vec!["One. two without end"]);
		assert_eq!(split_sentences("One.  Two"), vec!["One.", "Two"]);
		assert!(split_sentences("   ").is_empty());
	}

	#[test]
	fn words_are_lowercased() {
		let tokens: Vec<String> = words("Don't PANIC, 'friend' -- 42!").collect();
		assert_eq!(tokens, vec!["don't", "panic", "friend", "42"]);
	}
}
