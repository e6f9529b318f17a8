use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::join_all;
use log::{debug, info, warn};

use crate::api::{MealDbClient, RecipeSource};
use crate::config::FinderConfig;
use crate::fallback::match_local;
use crate::model::{CandidateSummary, FanOutStats, RecipeDetail, SearchOutcome};
use crate::scoring::score_and_rank;
use crate::{IngredientQuery, SearchError};

/// Runs ingredient searches against a recipe source, falling back to the
/// offline table when the source cannot be reached.
///
/// Searches on a finder are independent of each other. Use
/// [`RecipeFinder::session`] when only the latest of overlapping searches
/// should produce a result.
pub struct RecipeFinder {
    source: Arc<dyn RecipeSource>,
    max_candidates: usize,
    fallback_enabled: bool,
}

/// A search box: a newer search started here supersedes older unfinished ones
pub struct SearchSession<'a> {
    finder: &'a RecipeFinder,
    generation: AtomicU64,
}

impl RecipeFinder {
    /// Create a finder talking to the configured recipe service
    pub fn from_config(config: &FinderConfig) -> Result<Self, SearchError> {
        let client = MealDbClient::new(&config.api_base_url, config.timeout_duration())?;
        Ok(Self::with_source(Arc::new(client), config))
    }

    /// Create a finder on top of any recipe source
    ///
    /// A `max_candidates` of zero is raised to one.
    pub fn with_source(source: Arc<dyn RecipeSource>, config: &FinderConfig) -> Self {
        if config.max_candidates == 0 {
            warn!("max_candidates must be at least 1, using 1");
        }
        RecipeFinder {
            source,
            max_candidates: config.max_candidates.max(1),
            fallback_enabled: config.fallback_enabled,
        }
    }

    /// Open a session whose searches discard results of the ones they overtake
    pub fn session(&self) -> SearchSession<'_> {
        SearchSession {
            finder: self,
            generation: AtomicU64::new(0),
        }
    }

    /// Parse raw user input and run the search.
    ///
    /// Input with no ingredient terms yields [`SearchOutcome::EmptyQuery`]
    /// without touching the network.
    pub async fn search_text(&self, raw: &str) -> Result<SearchOutcome, SearchError> {
        match parse_input(raw)? {
            Some(query) => self.search(query).await,
            None => Ok(SearchOutcome::EmptyQuery),
        }
    }

    /// Run one search.
    ///
    /// Only a failed primary lookup leads to the offline table. Failed
    /// detail fetches just shrink the result set.
    pub async fn search(&self, query: IngredientQuery) -> Result<SearchOutcome, SearchError> {
        self.run(query, None).await
    }

    async fn run(
        &self,
        query: IngredientQuery,
        latest: Option<(&AtomicU64, u64)>,
    ) -> Result<SearchOutcome, SearchError> {
        let candidates = match self.source.filter_by_ingredient(query.primary()).await {
            Ok(candidates) => candidates,
            Err(e) if self.fallback_enabled => {
                warn!(
                    "Primary lookup on {} failed, using offline recipes: {}",
                    self.source.source_name(),
                    e
                );
                return Ok(SearchOutcome::Local {
                    matches: match_local(&query),
                    query,
                });
            }
            Err(e) => return Err(e),
        };

        if candidates.is_empty() {
            info!("No recipes found with '{}'", query.primary());
            return Ok(SearchOutcome::PrimaryEmpty {
                term: query.primary().to_string(),
            });
        }

        let total = candidates.len();
        let mut candidates = candidates;
        candidates.truncate(self.max_candidates);
        debug!(
            "{} candidates for '{}', keeping {}",
            total,
            query.primary(),
            candidates.len()
        );

        if !query.has_secondary() {
            info!("Single ingredient search, showing {} summaries", candidates.len());
            return Ok(SearchOutcome::Summaries { query, candidates });
        }

        let (details, stats) = self.fetch_details(&candidates).await;

        if let Some((counter, generation)) = latest {
            if counter.load(Ordering::SeqCst) != generation {
                debug!("Discarding results of superseded search {}", generation);
                return Ok(SearchOutcome::Superseded);
            }
        }

        let recipes = score_and_rank(details, &query);
        info!(
            "{} of {} fetched recipes matched {:?}",
            recipes.len(),
            stats.succeeded,
            query.terms()
        );

        Ok(SearchOutcome::Ranked {
            query,
            recipes,
            stats,
        })
    }

    /// Fetch every candidate's detail concurrently and wait until all settle.
    ///
    /// Details come back in candidate order regardless of completion order.
    async fn fetch_details(
        &self,
        candidates: &[CandidateSummary],
    ) -> (Vec<RecipeDetail>, FanOutStats) {
        let fetches = candidates.iter().map(|candidate| async move {
            let result = self.source.lookup_by_id(&candidate.id).await;
            debug!("Detail fetch for {} settled", candidate.id);
            (candidate, result)
        });

        let settled = join_all(fetches).await;

        let mut stats = FanOutStats {
            requested: candidates.len(),
            ..Default::default()
        };
        let mut details = Vec::with_capacity(settled.len());

        for (candidate, result) in settled {
            match result {
                Ok(Some(detail)) => {
                    stats.succeeded += 1;
                    details.push(detail);
                }
                Ok(None) => {
                    warn!("No detail for candidate {} ({})", candidate.id, candidate.name);
                    stats.failed += 1;
                }
                Err(e) => {
                    warn!(
                        "Detail fetch for {} ({}) failed: {}",
                        candidate.id, candidate.name, e
                    );
                    stats.failed += 1;
                }
            }
        }

        (details, stats)
    }
}

impl SearchSession<'_> {
    /// Like [`RecipeFinder::search_text`], but yields
    /// [`SearchOutcome::Superseded`] when a newer search in this session
    /// started before this one settled
    pub async fn search_text(&self, raw: &str) -> Result<SearchOutcome, SearchError> {
        match parse_input(raw)? {
            Some(query) => self.search(query).await,
            None => Ok(SearchOutcome::EmptyQuery),
        }
    }

    pub async fn search(&self, query: IngredientQuery) -> Result<SearchOutcome, SearchError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.finder
            .run(query, Some((&self.generation, generation)))
            .await
    }
}

fn parse_input(raw: &str) -> Result<Option<IngredientQuery>, SearchError> {
    match IngredientQuery::parse(raw) {
        Ok(query) => Ok(Some(query)),
        Err(SearchError::EmptyQuery) => Ok(None),
        Err(e) => Err(e),
    }
}
