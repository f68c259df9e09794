// validation.rs - Input validation utilities

use regex::Regex;
use std::path::PathBuf;

use crate::cli::args::Args;
use crate::core::FamilyParams;
use crate::data::loaders::{has_fasta_extension, FASTA_EXTENSIONS};

pub struct ValidationResult {
    pub params: FamilyParams,
    pub inputs: Vec<PathBuf>,
    pub sample_pattern: Option<Regex>,
}

/// Validate all command line arguments
pub fn validate_args(args: &Args) -> Result<ValidationResult, String> {
    // Clustering parameters are checked before any file is touched
    let params =
        FamilyParams::new(args.families, args.max_distance).map_err(|e| e.to_string())?;

    if args.inputs.is_empty() {
        return Err("At least one FASTA file is required".to_string());
    }

    let mut inputs = Vec::with_capacity(args.inputs.len());
    for input in &args.inputs {
        let path = PathBuf::from(input);
        if !has_fasta_extension(&path) {
            return Err(format!(
                "Input '{}' is not a FASTA file (expected extension: {})",
                input,
                FASTA_EXTENSIONS.join(", ")
            ));
        }
        if !path.is_file() {
            return Err(format!("Input file not found: {}", input));
        }
        if inputs.contains(&path) {
            return Err(format!("Input file given twice: {}", input));
        }
        inputs.push(path);
    }

    if args.min_occurrence == 0 {
        println!("⚠️  --min-occurrence 0 keeps every sequence");
    }

    // Compile regex pattern
    let sample_pattern = if let Some(pattern) = &args.sample_pattern {
        let regex =
            Regex::new(pattern).map_err(|e| format!("Invalid sample_pattern regex: {}", e))?;
        if regex.captures_len() < 2 {
            return Err(format!(
                "sample_pattern '{}' must contain a capture group naming the sample",
                pattern
            ));
        }
        Some(regex)
    } else {
        None
    };

    Ok(ValidationResult {
        params,
        inputs,
        sample_pattern,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use argh::FromArgs;
    use std::fs;

    fn parse(args: &[&str]) -> Args {
        Args::from_args(&["seqfam"], args).unwrap()
    }

    fn fasta_in(dir: &std::path::Path, name: &str) -> String {
        let path = dir.join(name);
        fs::write(&path, ">r\nACGT\n").unwrap();
        path.to_string_lossy().to_string()
    }

    #[test]
    fn test_valid_arguments() {
        let dir = tempfile::tempdir().unwrap();
        let input = fasta_in(dir.path(), "R00.fas");

        let result = validate_args(&parse(&[
            "--families",
            "3",
            "--max-distance",
            "2",
            "--sample-pattern",
            "^(R[0-9]+)",
            input.as_str(),
        ]))
        .unwrap();

        assert_eq!(result.params.target_families, 3);
        assert_eq!(result.params.max_distance, 2);
        assert_eq!(result.inputs.len(), 1);
        assert!(result.sample_pattern.is_some());
    }

    #[test]
    fn test_rejects_bad_parameters() {
        let dir = tempfile::tempdir().unwrap();
        let input = fasta_in(dir.path(), "R00.fas");

        let err = validate_args(&parse(&["--families", "0", input.as_str()])).err().unwrap();
        assert!(err.contains("target family count"));

        let mut args = parse(&[input.as_str()]);
        args.max_distance = -1;
        let err = validate_args(&args).err().unwrap();
        assert!(err.contains("maximum edit distance"));
    }

    #[test]
    fn test_rejects_bad_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let input = fasta_in(dir.path(), "R00.fas");

        assert!(validate_args(&parse(&[])).is_err());
        assert!(validate_args(&parse(&["reads.txt"])).is_err());
        assert!(validate_args(&parse(&["/nonexistent/R01.fas"])).is_err());
        assert!(validate_args(&parse(&[input.as_str(), input.as_str()])).is_err());
    }

    #[test]
    fn test_sample_pattern_needs_capture_group() {
        let dir = tempfile::tempdir().unwrap();
        let input = fasta_in(dir.path(), "R00.fas");

        let err = validate_args(&parse(&["--sample-pattern", "^R[0-9]+", input.as_str()]))
            .err()
            .unwrap();
        assert!(err.contains("capture group"));

        assert!(validate_args(&parse(&["--sample-pattern", "(", input.as_str()])).is_err());
    }
}
