//! 预导入模块，方便使用

pub use super::board_members::{
    ActiveModel as BoardMemberActiveModel, Entity as BoardMembers, Model as BoardMemberModel,
};
pub use super::defense_boards::{
    ActiveModel as DefenseBoardActiveModel, Entity as DefenseBoards, Model as DefenseBoardModel,
};
pub use super::evaluations::{
    ActiveModel as EvaluationActiveModel, Entity as Evaluations, Model as EvaluationModel,
};
pub use super::proposal_members::{
    ActiveModel as ProposalMemberActiveModel, Entity as ProposalMembers,
    Model as ProposalMemberModel,
};
pub use super::proposals::{
    ActiveModel as ProposalActiveModel, Entity as Proposals, Model as ProposalModel,
};
pub use super::published_results::{
    ActiveModel as PublishedResultActiveModel, Entity as PublishedResults,
    Model as PublishedResultModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
