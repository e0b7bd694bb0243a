/// Substring rewrites applied by [`clean`], in order.
///
/// Each rewrite runs over the whole text before the next one, so the
/// order matters: longer space runs are collapsed before shorter ones.
const REWRITES: [(&str, &str); 13] = [
	(" i ", " I "),
	("    ", " "),
	("   ", " "),
	("  ", " "),
	("\n,", ","),
	("\n.", "."),
	(" , ", ", "),
	(" . ", ". "),
	("?. ", "? "),
	("?, ", "? "),
	("?.", "?"),
	("\n\n\n\n", "\n\n"),
	("\n\n\n", "\n\n"),
];

/// Normalizes whitespace and punctuation artifacts of assembled text.
///
/// # Behavior
/// - Uppercases a standalone `i` pronoun.
/// - Collapses runs of 2 to 4 spaces into one.
/// - Pulls `,` and `.` back onto the line they end (`"\n,"`, `"\n."`).
/// - Turns `" , "` / `" . "` into trailing punctuation.
/// - Folds `"?."` and `"?,"` into `"?"`.
/// - Collapses 3 or 4 consecutive newlines into a paragraph break.
///
/// Pure, but not formally idempotent: rewrites can create new matches
/// for earlier ones.
pub fn clean(text: &str) -> String {
	REWRITES
		.iter()
		.fold(text.to_owned(), |acc, (from, to)| acc.replace(from, to))
}
