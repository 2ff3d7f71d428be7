pub mod auth;
pub mod defense_boards;
pub mod evaluations;
pub mod proposals;

pub use auth::AuthService;
pub use defense_boards::DefenseBoardService;
pub use evaluations::EvaluationService;
pub use proposals::ProposalService;
