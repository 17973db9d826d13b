//! Per-session team state and saved teams

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use async_trait::async_trait;
use pokedex_team::{TeamError, TeamState};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::ServiceError;
use crate::config::Config;

/// Identifies one caller's working team
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifies a saved team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(u64);

impl TeamId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavedTeam {
    pub id: TeamId,
    #[serde(flatten)]
    pub team: TeamState,
}

/// Persistence for saved teams.
///
/// Implement this to back saved teams with something other than memory.
#[async_trait]
pub trait TeamArchive: Send + Sync {
    async fn insert(&self, team: TeamState) -> TeamId;

    async fn list(&self) -> Vec<SavedTeam>;

    async fn get(&self, id: TeamId) -> Option<TeamState>;
}

/// Saved teams held in memory, ids handed out sequentially from 1
#[derive(Debug, Default)]
pub struct MemoryArchive {
    teams: RwLock<BTreeMap<TeamId, TeamState>>,
}

#[async_trait]
impl TeamArchive for MemoryArchive {
    async fn insert(&self, team: TeamState) -> TeamId {
        let mut teams = self.teams.write().await;
        let id = TeamId(teams.keys().next_back().map_or(1, |last| last.0 + 1));
        teams.insert(id, team);
        id
    }

    async fn list(&self) -> Vec<SavedTeam> {
        self.teams
            .read()
            .await
            .iter()
            .map(|(&id, team)| SavedTeam {
                id,
                team: team.clone(),
            })
            .collect()
    }

    async fn get(&self, id: TeamId) -> Option<TeamState> {
        self.teams.read().await.get(&id).cloned()
    }
}

/// Working teams keyed by session, plus the saved-team archive
pub struct TeamStore {
    sessions: RwLock<HashMap<SessionId, TeamState>>,
    archive: Box<dyn TeamArchive>,
    default_name: String,
    capacity: usize,
}

impl TeamStore {
    pub fn new(config: &Config) -> Self {
        Self::with_archive(config, MemoryArchive::default())
    }

    pub fn with_archive(config: &Config, archive: impl TeamArchive + 'static) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            archive: Box::new(archive),
            default_name: config.default_team_name.clone(),
            capacity: config.max_team_size,
        }
    }

    fn empty_team(&self) -> TeamState {
        TeamState::new(self.default_name.as_str()).with_capacity(self.capacity)
    }

    /// The session's team, or a fresh empty one
    pub async fn get(&self, session: &SessionId) -> TeamState {
        self.sessions
            .read()
            .await
            .get(session)
            .cloned()
            .unwrap_or_else(|| self.empty_team())
    }

    pub async fn put(&self, session: SessionId, team: TeamState) {
        self.sessions.write().await.insert(session, team);
    }

    /// Apply `edit` to the session's team under the write lock
    pub async fn modify<F, T>(&self, session: &SessionId, edit: F) -> Result<T, TeamError>
    where
        F: FnOnce(&mut TeamState) -> Result<T, TeamError>,
    {
        let mut sessions = self.sessions.write().await;
        let team = sessions
            .entry(session.clone())
            .or_insert_with(|| self.empty_team());

        edit(team)
    }

    pub async fn end_session(&self, session: &SessionId) -> Option<TeamState> {
        self.sessions.write().await.remove(session)
    }

    /// Archive the session's current team
    pub async fn save(&self, session: &SessionId) -> Result<TeamId, TeamError> {
        let team = self.get(session).await;
        if team.is_empty() {
            return Err(TeamError::EmptyTeam);
        }

        let id = self.archive.insert(team).await;
        tracing::info!(%session, team_id = %id, "Team saved");
        Ok(id)
    }

    pub async fn list_saved(&self) -> Vec<SavedTeam> {
        self.archive.list().await
    }

    /// Replace the session's team with a saved one
    pub async fn load_saved(&self, session: &SessionId, id: TeamId) -> Result<TeamState, ServiceError> {
        let team = self
            .archive
            .get(id)
            .await
            .ok_or(ServiceError::TeamNotFound(id))?;

        self.put(session.clone(), team.clone()).await;
        Ok(team)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pokedex_team::TeamSlot;
    use serde_json::json;

    fn store() -> TeamStore {
        TeamStore::new(&Config::default())
    }

    fn slot(id: u32, name: &str, types: &[&str]) -> TeamSlot {
        TeamSlot::new(id, name, types.iter().map(|t| t.to_string()).collect())
    }

    #[tokio::test]
    async fn test_unknown_session_gets_empty_team() {
        let team = store().get(&SessionId::from("ash")).await;

        assert!(team.is_empty());
        assert_eq!(team.name, "My Team");
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = store();
        let ash = SessionId::from("ash");
        let misty = SessionId::from("misty");

        store
            .modify(&ash, |team| team.add(slot(25, "Pikachu", &["Electric"])))
            .await
            .unwrap();

        assert_eq!(store.get(&ash).await.len(), 1);
        assert!(store.get(&misty).await.is_empty());
    }

    #[tokio::test]
    async fn test_modify_uses_configured_capacity() {
        let config = Config {
            max_team_size: 1,
            ..Config::default()
        };
        let store = TeamStore::new(&config);
        let session = SessionId::from("brock");

        store
            .modify(&session, |team| team.add(slot(74, "Geodude", &["Rock", "Ground"])))
            .await
            .unwrap();
        let err = store
            .modify(&session, |team| team.add(slot(95, "Onix", &["Rock", "Ground"])))
            .await
            .unwrap_err();

        assert_eq!(err, TeamError::TeamFull { capacity: 1 });
    }

    #[tokio::test]
    async fn test_save_empty_team_fails() {
        let store = store();

        assert_eq!(store.save(&SessionId::from("gary")).await, Err(TeamError::EmptyTeam));
        assert!(store.list_saved().await.is_empty());
    }

    #[tokio::test]
    async fn test_save_list_load() {
        let store = store();
        let ash = SessionId::from("ash");
        let misty = SessionId::from("misty");

        store
            .modify(&ash, |team| {
                team.rename("Kanto");
                team.add(slot(25, "Pikachu", &["Electric"]))
            })
            .await
            .unwrap();
        let id = store.save(&ash).await.unwrap();
        assert_eq!(id, TeamId::new(1));

        let saved = store.list_saved().await;
        assert_eq!(saved.len(), 1);
        assert_eq!(serde_json::to_value(&saved[0]).unwrap()["id"], json!(1));
        assert_eq!(serde_json::to_value(&saved[0]).unwrap()["name"], json!("Kanto"));

        let loaded = store.load_saved(&misty, id).await.unwrap();
        assert_eq!(loaded.name, "Kanto");
        assert_eq!(store.get(&misty).await, loaded);
    }

    #[tokio::test]
    async fn test_load_unknown_team() {
        let store = store();
        let result = store.load_saved(&SessionId::from("ash"), TeamId::new(42)).await;

        assert!(matches!(result, Err(ServiceError::TeamNotFound(id)) if id == TeamId::new(42)));
    }

    #[tokio::test]
    async fn test_end_session() {
        let store = store();
        let ash = SessionId::from("ash");
        store.put(ash.clone(), TeamState::new("Temp")).await;

        assert_eq!(store.end_session(&ash).await.map(|t| t.name), Some("Temp".to_string()));
        assert_eq!(store.get(&ash).await.name, "My Team");
    }
}
