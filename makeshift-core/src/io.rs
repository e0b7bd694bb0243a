use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use crate::error::{MakeshiftError, Result};

/// Reads a text file and returns its whole content.
pub(crate) fn read_text<P: AsRef<Path>>(filename: P) -> io::Result<String> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents)
}

/// Reads a text file and returns all its lines as a `Vec<String>`.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`
pub(crate) fn read_file<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	Ok(read_text(filename)?.lines().map(str::to_owned).collect())
}

/// Writes `text` to `filename`, replacing any previous content.
pub(crate) fn write_text<P: AsRef<Path>>(filename: P, text: &str) -> io::Result<()> {
	fs::write(filename, text)
}

/// Builds an output path based on an input path and a new extension.
///
/// Example:
/// `sources/conwell_sents.txt` + `"bin"` → `sources/conwell_sents.bin`
pub(crate) fn build_output_path<P: AsRef<Path>>(
	input_path: P,
	output_extension: &str,
) -> io::Result<PathBuf> {
	let input_path = input_path.as_ref();

	let parent = input_path.parent().unwrap_or_else(|| Path::new("."));
	let file_stem = input_path
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Input path has no filename"))?;

	let mut output = PathBuf::from(parent);
	output.push(file_stem);
	output.set_extension(output_extension);

	Ok(output)
}

/// Normalize a folder path.
///
/// - `"."` or `"./"` resolves to the current working directory
/// - Other paths are returned as-is (not canonicalized)
pub(crate) fn normalize_folder<P: AsRef<Path>>(input: P) -> PathBuf {
	let input = input.as_ref();
	if input == Path::new(".") || input == Path::new("./") {
		env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
	} else {
		input.to_path_buf()
	}
}

/// Lists the files of `dir` whose name matches the glob `pattern`.
///
/// Paths are returned sorted so that concatenation order is stable
/// across platforms. Directories are skipped.
///
/// # Errors
/// - `MissingSources` if nothing matches.
pub(crate) fn list_matching<P: AsRef<Path>>(dir: P, pattern: &str) -> Result<Vec<PathBuf>> {
	let full_pattern = dir.as_ref().join(pattern);
	let full_pattern = full_pattern.to_string_lossy();

	let mut files = Vec::new();
	for entry in glob::glob(&full_pattern)? {
		let path = entry?;
		if path.is_file() {
			files.push(path);
		}
	}
	files.sort();

	if files.is_empty() {
		return Err(MakeshiftError::MissingSources(full_pattern.into_owned()));
	}
	Ok(files)
}
