//! Plain-text rendering of a pipeline trace. Read-only: nothing here feeds
//! back into the pipeline.

use std::fmt;

use ciphermesh::layers::TraceStep;
use ciphermesh::{Details, LayerTrace, Payload};

/// Prints the trace to stdout.
pub fn print_details(details: &Details) {
    print!("{}", format_details(details));
}

/// Formats the trace, one section per layer.
pub fn format_details(details: &Details) -> String {
    DetailsView(details).to_string()
}

struct DetailsView<'a>(&'a Details);

impl fmt::Display for DetailsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let details = self.0;
        let (label, payload) = match &details.payload {
            Payload::Plaintext(p) => ("Plaintext", p),
            Payload::Ciphertext(c) => ("Ciphertext", c),
        };
        writeln!(f, "{}: {} ({} characters)", label, payload, details.length)?;

        for layer in &details.layers {
            writeln!(f)?;
            writeln!(f, "== {} ==", layer.name)?;
            if let Some(formula) = &layer.formula {
                writeln!(f, "  formula: {}", formula)?;
            }
            writeln!(f, "  input:  {}", layer.input)?;

            match &layer.trace {
                LayerTrace::Steps(steps) => {
                    for step in steps {
                        writeln!(f, "  ├── {}", format_step(step))?;
                    }
                }
                LayerTrace::Blocks(blocks) => {
                    for block in blocks {
                        writeln!(f, "  ├── [{}] -> [{}]", block.original, block.transformed)?;
                    }
                }
            }

            writeln!(f, "  └── output: {}", layer.output)?;
        }

        Ok(())
    }
}

fn format_step(step: &TraceStep) -> String {
    match step {
        TraceStep::Shift(s) => match s.category {
            Some(category) => format!(
                "'{}' ({}) | shift {} | '{}'",
                s.input, category, s.shift, s.output
            ),
            None => format!("'{}' (unrecognised, copied) | '{}'", s.input, s.output),
        },
        TraceStep::Affine(a) => format!(
            "'{}' ({}) | {} | '{}' ({})",
            a.input, a.input_index, a.formula, a.output, a.output_index
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ciphermesh::CipherMesh;

    #[test]
    fn test_format_encrypt_trace() {
        let result = CipherMesh::new().encrypt_with_details("Hi!").unwrap();
        let text = format_details(&result.details);

        assert!(text.starts_with("Plaintext: Hi! (3 characters)"));
        assert!(text.contains("== Layer 1: Category Shift =="));
        assert!(text.contains("'H' (Consonant) | shift 3 | 'CK'"));
        assert!(text.contains("'C' (35) | (3×35+7) mod 95 = 17 | '1' (17)"));
        assert!(text.contains("[1IjS] -> [SjI1]"));
        assert!(text.contains("└── output: SjI1-a"));
    }

    #[test]
    fn test_format_stray_unit() {
        let result = CipherMesh::new().decrypt_with_details("SjI1-").unwrap();
        let text = format_details(&result.details);
        assert!(text.starts_with("Ciphertext: SjI1- (5 characters)"));
        assert!(text.contains("unrecognised, copied"));
    }

    #[test]
    fn test_format_sections_per_layer() {
        let result = CipherMesh::new().decrypt_with_details("SjI1-a").unwrap();
        let text = format_details(&result.details);

        assert_eq!(text.matches("└── output:").count(), 3);
        assert!(text.contains("== Reversing Layer 3: Block Reversal =="));
        assert!(text.ends_with("└── output: Hi!\n"));
    }
}
