//! NHK on-demand catalog documents and the HTTP client that fetches them.

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::sync::LazyLock;

use attohttpc::header::USER_AGENT;
use attohttpc::Session;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;
use tracing::warn;

use crate::error::Result;
use crate::Program;

static START_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{4})-(\d{2})-(\d{2})T(\d{2}):(\d{2}):(\d{2})\+09:00_").unwrap()
});

/// Top-level listing of every on-demand site.
#[derive(Debug, Deserialize)]
pub struct Catalog {
    pub data_list: Vec<Site>,
}

#[derive(Debug, Deserialize)]
pub struct Site {
    pub site_id: String,
    #[serde(default)]
    pub program_name: Option<String>,
    pub detail_json: String,
}

impl Catalog {
    /// Pairs each requested program with its detail document URL, in catalog
    /// order. Programs the catalog does not list are left out.
    pub fn detail_urls(&self, programs: &[Program]) -> Vec<(Program, String)> {
        let mut found: Vec<(Program, String)> = Vec::new();
        for site in &self.data_list {
            for program in programs {
                if site.site_id != program.site_id() || found.iter().any(|(p, _)| p == program) {
                    continue;
                }
                debug!(
                    program = program.name(),
                    title = ?site.program_name,
                    url = site.detail_json.as_str(),
                    "Found in catalog"
                );
                found.push((*program, site.detail_json.clone()));
            }
        }

        for program in programs {
            if !found.iter().any(|(p, _)| p == program) {
                warn!(program = program.name(), "Program is not in the catalog");
            }
        }
        found
    }
}

/// Per-program listing of episodes.
#[derive(Debug, Deserialize)]
pub struct Detail {
    pub main: DetailMain,
}

#[derive(Debug, Deserialize)]
pub struct DetailMain {
    #[serde(default)]
    pub program_name: Option<String>,
    pub detail_list: Vec<Episode>,
}

#[derive(Debug, Deserialize)]
pub struct Episode {
    #[serde(default)]
    pub headline: Option<String>,
    pub file_list: Vec<EpisodeFile>,
}

#[derive(Debug, Deserialize)]
pub struct EpisodeFile {
    /// Stream manifest URL.
    pub file_name: String,
    /// Broadcast window, e.g. `2022-03-05T21:00:00+09:00_2022-03-05T21:50:00+09:00`.
    #[serde(default)]
    pub aa_vinfo4: String,
}

impl Episode {
    pub fn file(&self) -> Option<&EpisodeFile> {
        self.file_list.first()
    }
}

impl EpisodeFile {
    /// Broadcast start in Japan local time, if `aa_vinfo4` carries one.
    pub fn start(&self) -> Option<NaiveDateTime> {
        parse_start(&self.aa_vinfo4)
    }
}

fn parse_start(vinfo: &str) -> Option<NaiveDateTime> {
    let caps = START_RE.captures(vinfo)?;
    let num = |i: usize| caps[i].parse::<u32>().ok();
    NaiveDate::from_ymd_opt(caps[1].parse().ok()?, num(2)?, num(3)?)?.and_hms_opt(
        num(4)?,
        num(5)?,
        num(6)?,
    )
}

/// Fetches catalog and detail documents, keeping a raw copy of each in
/// `dump_dir`.
pub struct CatalogClient {
    catalog_url: String,
    user_agent: String,
    insecure: bool,
    dump_dir: PathBuf,
    sess: Session,
}

impl CatalogClient {
    pub fn new<P: Into<PathBuf>>(
        catalog_url: String,
        user_agent: String,
        insecure: bool,
        dump_dir: P,
    ) -> Self {
        Self {
            catalog_url,
            user_agent,
            insecure,
            dump_dir: dump_dir.into(),
            sess: Session::new(),
        }
    }

    pub fn fetch_catalog(&self) -> Result<Catalog> {
        self.fetch(&self.catalog_url, &self.dump_dir.join("index.json"))
    }

    pub fn fetch_detail(&self, program: Program, url: &str) -> Result<Detail> {
        self.fetch(url, &self.dump_dir.join(format!("{}.json", program.name())))
    }

    fn fetch<T: DeserializeOwned>(&self, url: &str, dump: &Path) -> Result<T> {
        debug!(url, "Fetching");
        let text = self
            .sess
            .get(url)
            .try_header(USER_AGENT, self.user_agent.as_str())?
            .danger_accept_invalid_certs(self.insecure)
            .send()?
            .error_for_status()?
            .text_utf8()?;

        fs::write(dump, &text)?;
        debug!(dump = %dump.display(), bytes = text.len(), "Saved raw document");

        Ok(serde_json::from_str(&text)?)
    }
}
