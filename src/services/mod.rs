pub mod catalog;
pub mod cycler;
pub mod enricher;
pub mod history;
pub mod resolver;
pub mod session;

pub use catalog::CatalogSource;
pub use catalog::MealDbClient;
pub use cycler::Cycler;
pub use enricher::DetailEnricher;
pub use enricher::DetailRequest;
pub use history::HistoryStore;
pub use history::HISTORY_CAPACITY;
pub use resolver::resolve_candidates;
pub use session::CandidateView;
pub use session::DiscoverySession;
