use std::io::{self, Write};

use anyhow::Result;

use crate::{
    cli::{Cli, PaletteArgs},
    palette::{Colormap, Palette},
};

pub fn run(_cli: &Cli, args: &PaletteArgs) -> Result<()> {
    let config = super::load_config(args.config.as_deref())?;
    let palette = Palette::build(&Colormap::gist_rainbow(), &config.affected, &config.adjacent, config.seed, &config.overrides)?;

    let mut out = io::stdout().lock();
    write_table(&mut out, &palette)?;
    out.flush()?;
    Ok(())
}

/// Tab-separated `district, color, status` rows under a header line.
pub fn write_table<W: Write>(writer: &mut W, palette: &Palette) -> Result<()> {
    writeln!(writer, "district\tcolor\tstatus")?;
    for entry in palette.entries() {
        writeln!(writer, "{}\t{}\t{}", entry.district, entry.color, entry.status)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_one_row_per_district() {
        let palette = Palette::build(&Colormap::gist_rainbow(), &[63], &[27], 105, &[]).unwrap();
        let mut buf = Vec::new();
        write_table(&mut buf, &palette).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("63\t#"));
        assert!(lines[1].ends_with("\tRuled unconstitutional as enacted"));
        assert!(lines[2].ends_with("\tAdjacent to a district ruled unconstitutional"));
    }
}
