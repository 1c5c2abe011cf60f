// src/common/messages.rs

// Mensagens de domínio da API. Ficam num lugar só porque a mesma
// mensagem sai tanto da checagem prévia no serviço quanto do
// "backstop" de constraint no repositório.

use uuid::Uuid;

pub fn team_not_found(id: Uuid) -> String {
    format!("Team with ID {id} not found")
}

pub fn user_not_found(id: Uuid) -> String {
    format!("User with ID {id} not found")
}

pub fn team_name_exists(name: &str) -> String {
    format!("Team with name \"{name}\" already exists")
}

pub fn cannot_delete_with_projects(id: Uuid, count: i64) -> String {
    format!(
        "Cannot delete team with ID {id} because it has {count} project(s) assigned. Please reassign or remove them first."
    )
}

pub fn cannot_delete_with_candidates(id: Uuid, count: i64) -> String {
    format!(
        "Cannot delete team with ID {id} because it has {count} candidate(s) assigned. Please reassign or remove them first."
    )
}

pub fn already_assigned(user_id: Uuid, team_id: Uuid) -> String {
    format!("User {user_id} is already assigned to team {team_id}")
}

pub fn not_assigned(user_id: Uuid, team_id: Uuid) -> String {
    format!("User {user_id} is not assigned to team {team_id}")
}

pub fn not_member_of_source_team(user_id: Uuid) -> String {
    format!("User {user_id} is not a member of the source team")
}

pub fn target_team_not_found() -> String {
    "Target team not found".to_string()
}

pub fn already_member_of_target_team(user_id: Uuid) -> String {
    format!("User {user_id} is already a member of the target team")
}

pub fn pending_transfer_exists(user_id: Uuid) -> String {
    format!("User {user_id} already has a pending transfer request")
}

pub fn transfer_access_denied() -> String {
    "Access denied: you are not a member of this team".to_string()
}

pub fn transfer_not_processable() -> String {
    "Transfer request not found or already processed".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_formats_match_the_api_contract() {
        let user = Uuid::parse_str("00000000-0000-0000-0000-0000000000aa").unwrap();
        let team = Uuid::parse_str("00000000-0000-0000-0000-0000000000bb").unwrap();

        assert_eq!(
            team_name_exists("Alpha"),
            "Team with name \"Alpha\" already exists"
        );
        assert_eq!(
            already_assigned(user, team),
            format!("User {user} is already assigned to team {team}")
        );
        assert!(cannot_delete_with_projects(team, 3).contains("3 project(s) assigned"));
        assert!(cannot_delete_with_candidates(team, 1).contains("1 candidate(s) assigned"));
        assert!(not_member_of_source_team(user).ends_with("is not a member of the source team"));
        assert_eq!(target_team_not_found(), "Target team not found");
        assert!(pending_transfer_exists(user).ends_with("already has a pending transfer request"));
    }
}
