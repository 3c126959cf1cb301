//! Styles command - print the output style table

use anyhow::Result;

/// Execute the styles command.
pub fn execute() -> Result<()> {
    for line in style_lines() {
        println!("{}", line);
    }
    Ok(())
}

fn style_lines() -> Vec<String> {
    let mut styles: Vec<_> = sass_binding::output_styles().iter().collect();
    styles.sort_by_key(|(_, code)| **code);
    styles
        .into_iter()
        .map(|(name, code)| format!("{code}\t{name}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_styles_ordered_by_code() {
        assert_eq!(
            style_lines(),
            vec!["0\tnested", "1\texpanded", "2\tcompact", "3\tcompressed"]
        );
    }
}
