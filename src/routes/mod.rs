pub mod auth;

pub mod proposals;

pub mod defense_boards;

pub mod evaluations;

pub use auth::configure_auth_routes;
pub use defense_boards::configure_defense_board_routes;
pub use evaluations::configure_evaluation_routes;
pub use proposals::configure_proposal_routes;
