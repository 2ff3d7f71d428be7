//! 评价权限判定
//!
//! 纯判定逻辑，调用方把 false 转成 403。

use std::sync::Arc;

use crate::errors::Result;
use crate::models::evaluations::entities::EvaluationType;
use crate::models::proposals::entities::Proposal;
use crate::models::users::entities::{User, UserRole};
use crate::storage::Storage;

/// 判断用户是否为提案所分配委员会的评委
///
/// 提案未分配委员会时一律否。
pub async fn is_board_member_for(
    storage: &Arc<dyn Storage>,
    proposal: &Proposal,
    user_id: i64,
) -> Result<bool> {
    match proposal.defense_board_id {
        Some(board_id) => storage.is_board_member(board_id, user_id).await,
        None => Ok(false),
    }
}

/// 导师评价资格：提案的导师或课程导师本人
pub fn is_supervisor_for(actor: &User, proposal: &Proposal) -> bool {
    actor.id == proposal.supervisor_id || Some(actor.id) == proposal.course_supervisor_id
}

/// 判定某用户能否以指定角色评价某提案
///
/// - supervisor：必须是提案的导师或课程导师本人
/// - committee：角色为答辩委员会，或在提案分配的委员会名单里
pub async fn can_evaluate(
    storage: &Arc<dyn Storage>,
    actor: &User,
    proposal: &Proposal,
    evaluation_type: EvaluationType,
) -> Result<bool> {
    match evaluation_type {
        EvaluationType::Supervisor => Ok(is_supervisor_for(actor, proposal)),
        EvaluationType::Committee => {
            if actor.role == UserRole::Committee {
                return Ok(true);
            }
            is_board_member_for(storage, proposal, actor.id).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::proposals::entities::ProposalStatus;
    use crate::models::users::entities::UserStatus;
    use crate::storage::sea_orm_storage::test_support;

    fn user(id: i64, role: UserRole) -> User {
        let now = chrono::Utc::now();
        User {
            id,
            username: format!("user{id}"),
            email: format!("user{id}@example.com"),
            password_hash: String::new(),
            role,
            status: UserStatus::Active,
            profile_name: String::new(),
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn proposal(supervisor_id: i64, course_supervisor_id: Option<i64>) -> Proposal {
        let now = chrono::Utc::now();
        Proposal {
            id: 1,
            title: "t".to_string(),
            abstract_text: None,
            supervisor_id,
            course_supervisor_id,
            defense_board_id: None,
            status: ProposalStatus::Approved,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_supervisor_eligibility() {
        let p = proposal(10, Some(11));
        assert!(is_supervisor_for(&user(10, UserRole::Supervisor), &p));
        assert!(is_supervisor_for(&user(11, UserRole::Supervisor), &p));
        // 其他导师不行
        assert!(!is_supervisor_for(&user(12, UserRole::Supervisor), &p));
        // 角色对不上身份也没用，看的是 ID
        assert!(!is_supervisor_for(&user(13, UserRole::Committee), &p));
    }

    #[test]
    fn test_supervisor_eligibility_without_course_supervisor() {
        let p = proposal(10, None);
        assert!(is_supervisor_for(&user(10, UserRole::Supervisor), &p));
        assert!(!is_supervisor_for(&user(11, UserRole::Supervisor), &p));
    }

    #[tokio::test]
    async fn test_committee_eligibility_matrix() {
        let sea = test_support::new_in_memory().await;
        let board_id = test_support::seed_board(&sea, "Board A").await;
        let member = test_support::seed_user(&sea, "member", UserRole::Supervisor).await;
        let outsider = test_support::seed_user(&sea, "outsider", UserRole::Supervisor).await;
        let chair = test_support::seed_user(&sea, "chair", UserRole::Committee).await;
        test_support::add_board_member(&sea, board_id, member.id).await;
        let storage: Arc<dyn Storage> = Arc::new(sea);

        let mut p = proposal(999, None);
        p.defense_board_id = Some(board_id);

        // 答辩委员会角色直接放行
        assert!(
            can_evaluate(&storage, &chair, &p, EvaluationType::Committee)
                .await
                .unwrap()
        );
        // 名单内的评委放行，角色不限
        assert!(
            can_evaluate(&storage, &member, &p, EvaluationType::Committee)
                .await
                .unwrap()
        );
        // 名单外且非委员会角色拒绝
        assert!(
            !can_evaluate(&storage, &outsider, &p, EvaluationType::Committee)
                .await
                .unwrap()
        );
        // 委员会身份不等于导师资格
        assert!(
            !can_evaluate(&storage, &chair, &p, EvaluationType::Supervisor)
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_committee_rejected_when_no_board_assigned() {
        let sea = test_support::new_in_memory().await;
        let board_id = test_support::seed_board(&sea, "Board A").await;
        let member = test_support::seed_user(&sea, "member", UserRole::Supervisor).await;
        test_support::add_board_member(&sea, board_id, member.id).await;
        let storage: Arc<dyn Storage> = Arc::new(sea);

        // 提案未分配委员会时，别处的名单成员也不能评
        let p = proposal(999, None);
        assert!(!is_board_member_for(&storage, &p, member.id).await.unwrap());
        assert!(
            !can_evaluate(&storage, &member, &p, EvaluationType::Committee)
                .await
                .unwrap()
        );
    }
}
