use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use rand::Rng;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::archive::copy_if_not_smaller;
use crate::archive::ensure_dir;
use crate::archive::Archived;
use crate::catalog::CatalogClient;
use crate::catalog::Detail;
use crate::config;
use crate::error::Error;
use crate::error::Result;
use crate::ffmpeg::MediaTool;
use crate::naming::episode_basename;
use crate::Program;

/// Downloads every listed episode of the requested on-demand programs.
pub struct OnDemandFetcher<T> {
    programs: Vec<Program>,
    radio_dir: PathBuf,
    tmp_dir: PathBuf,
    min_delay: u64,
    max_delay: u64,
    client: CatalogClient,
    tool: T,
}

impl OnDemandFetcher<()> {
    pub fn builder() -> OnDemandFetcherBuilder {
        OnDemandFetcherBuilder::default()
    }
}

impl<T: MediaTool> OnDemandFetcher<T> {
    /// Runs the whole fetch.
    ///
    /// Episodes whose start time cannot be read are skipped. An episode the
    /// media tool fails to produce ends the run with [`Error::MissingOutput`].
    pub fn fetch_all(&self) -> Result<Vec<Archived>> {
        self.tool.ensure_available()?;
        ensure_dir(&self.radio_dir)?;
        ensure_dir(&self.tmp_dir)?;

        let catalog = self.client.fetch_catalog()?;
        let mut archived = Vec::new();

        for (program, url) in catalog.detail_urls(&self.programs) {
            let detail = self.client.fetch_detail(program, &url)?;
            info!(
                program = program.name(),
                title = ?detail.main.program_name,
                episodes = detail.main.detail_list.len(),
                "Processing program"
            );
            archived.extend(self.fetch_program(program, &detail)?);
        }
        Ok(archived)
    }

    fn fetch_program(&self, program: Program, detail: &Detail) -> Result<Vec<Archived>> {
        let mut archived = Vec::new();

        for episode in &detail.main.detail_list {
            let Some(file) = episode.file() else {
                warn!(
                    program = program.name(),
                    headline = ?episode.headline,
                    "Episode has no stream. Skipped."
                );
                continue;
            };
            let Some(start) = file.start() else {
                info!(
                    program = program.name(),
                    aa_vinfo4 = file.aa_vinfo4.as_str(),
                    "Pattern matching failed! Episode skipped."
                );
                continue;
            };

            let basename = episode_basename(program.name(), start);
            let fresh = self.tmp_dir.join(format!("{basename}.aac"));
            let dest = self.radio_dir.join(format!("{basename}.aac"));

            info!(file = %fresh.display(), "Fetching episode");
            let delay = self.delay();
            debug!(?delay, "Sleeping");
            thread::sleep(delay);

            self.tool.fetch_episode(&file.file_name, &fresh)?;
            if !fresh.exists() {
                return Err(Error::MissingOutput {
                    path: fresh,
                    stage: "retrieval of data",
                });
            }

            let outcome = copy_if_not_smaller(&fresh, &dest)?;
            archived.push(Archived {
                path: dest,
                outcome,
            });
        }
        Ok(archived)
    }

    fn delay(&self) -> Duration {
        let max = self.max_delay.max(self.min_delay);
        Duration::from_secs(rand::thread_rng().gen_range(self.min_delay..=max))
    }
}

#[derive(Debug)]
pub struct OnDemandFetcherBuilder {
    programs: Vec<Program>,
    radio_dir: PathBuf,
    tmp_dir: Option<PathBuf>,
    catalog_url: String,
    user_agent: String,
    insecure: bool,
    min_delay: u64,
    max_delay: u64,
}

impl OnDemandFetcherBuilder {
    pub fn programs<I: IntoIterator<Item = Program>>(mut self, programs: I) -> Self {
        self.programs = programs.into_iter().collect();
        self
    }

    pub fn radio_dir<P: Into<PathBuf>>(mut self, radio_dir: P) -> Self {
        self.radio_dir = radio_dir.into();
        self
    }

    pub fn tmp_dir<P: Into<PathBuf>>(mut self, tmp_dir: P) -> Self {
        self.tmp_dir = Some(tmp_dir.into());
        self
    }

    pub fn catalog_url(mut self, catalog_url: String) -> Self {
        self.catalog_url = catalog_url;
        self
    }

    pub fn user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }

    /// Skips TLS certificate validation.
    pub fn insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    /// Upper bound of the random pause before each download, in seconds.
    pub fn max_delay(mut self, secs: u64) -> Self {
        self.max_delay = secs;
        self
    }

    /// Lower bound of the random pause before each download, in seconds.
    pub fn min_delay(mut self, secs: u64) -> Self {
        self.min_delay = secs;
        self
    }

    pub fn build<T: MediaTool>(self, tool: T) -> OnDemandFetcher<T> {
        let tmp_dir = self.tmp_dir.unwrap_or_else(config::default_tmp_dir);
        OnDemandFetcher {
            programs: self.programs,
            radio_dir: self.radio_dir,
            client: CatalogClient::new(self.catalog_url, self.user_agent, self.insecure, &tmp_dir),
            tmp_dir,
            min_delay: self.min_delay,
            max_delay: self.max_delay,
            tool,
        }
    }
}

impl Default for OnDemandFetcherBuilder {
    fn default() -> Self {
        Self {
            programs: Vec::new(),
            radio_dir: config::default_radio_dir(),
            tmp_dir: None,
            catalog_url: String::from(config::CATALOG_URL),
            user_agent: String::from(config::DEFAULT_USER_AGENT),
            insecure: false,
            min_delay: config::MIN_DELAY_SECS,
            max_delay: config::DEFAULT_MAX_DELAY_SECS,
        }
    }
}
