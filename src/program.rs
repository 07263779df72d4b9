use std::fmt;

use clap::builder::PossibleValue;
use clap::ValueEnum;

/// An on-demand program and the site id the catalog knows it by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Program {
    name: &'static str,
    site_id: &'static str,
}

const fn program(name: &'static str, site_id: &'static str) -> Program {
    Program { name, site_id }
}

pub const PROGRAMS: &[Program] = &[
    program("adventure", "0164"),
    program("amami", "7226"),
    program("audiodrama", "0055"),
    program("culture_archive", "1890"),
    program("culture_art", "1928"),
    program("culture_chinese", "1930"),
    program("culture_history", "1927"),
    program("culture_literature", "1929"),
    program("culture_science", "3065"),
    program("earthradio", "0184"),
    program("edoradio", "7263"),
    program("genichiro", "6324"),
    program("hoshizora", "3489"),
    program("jikutabi", "3393"),
    program("kotenkyoshitsu", "6311"),
    program("mainichi10minyose", "7241"),
    program("matsuodo", "0715"),
    program("meisakuza", "0930"),
    program("nemurenai", "2401"),
    program("newsdeeigojutsu", "4812"),
    program("nhkjournal", "0045"),
    program("nihongojiten", "0972"),
    program("okinawanecchuclub", "0575"),
    program("shinyabin", "0324"),
    program("theatre", "0058"),
    program("umicafe", "6988"),
    program("weekendsunshine", "0029"),
    program("yamacafe", "4750"),
    program("yamazakimariradio", "7239"),
    program("yamyamplaylist", "7210"),
];

impl Program {
    pub fn find(name: &str) -> Option<Program> {
        PROGRAMS.iter().find(|p| p.name == name).copied()
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn site_id(&self) -> &'static str {
        self.site_id
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl ValueEnum for Program {
    fn value_variants<'a>() -> &'a [Self] {
        PROGRAMS
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(PossibleValue::new(self.name))
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn registry_is_unique() {
        let names: HashSet<_> = PROGRAMS.iter().map(Program::name).collect();
        let site_ids: HashSet<_> = PROGRAMS.iter().map(Program::site_id).collect();
        assert_eq!(names.len(), PROGRAMS.len());
        assert_eq!(site_ids.len(), PROGRAMS.len());
    }

    #[test]
    fn find_by_name() {
        assert_eq!(Program::find("matsuodo").unwrap().site_id(), "0715");
        assert_eq!(Program::find("adventure").unwrap().site_id(), "0164");
        assert!(Program::find("nosuchprogram").is_none());
    }

    #[test]
    fn parses_as_cli_value() {
        let program = Program::from_str("genichiro", false).unwrap();
        assert_eq!(program.site_id(), "6324");
        assert!(Program::from_str("GENICHIRO", false).is_err());
    }
}
