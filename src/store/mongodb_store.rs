use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::stream::TryStreamExt;
use mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime;
use mongodb::bson::{doc, oid::ObjectId, DateTime as BsonDateTime, Document};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{
    ClientOptions, FindOneAndUpdateOptions, FindOptions, IndexOptions, ReturnDocument,
};
use mongodb::{Client, Collection, IndexModel};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::{
    Match, MatchPatch, MatchStatus, Player, PlayerPatch, Team, TeamPatch, User,
};
use crate::store::{Store, StoreError};

/// The config struct for MongoDB connections.
/// Contains the URI and database name.
#[derive(Deserialize, Serialize, JsonSchema, Debug)]
pub struct MongoDBConfig {
    pub uri: String,
    pub database: String,
}

/// A concrete `Store` implementation that uses MongoDB.
///
/// One collection per record kind; a unique index on `email` backs the
/// identity uniqueness invariant.
pub struct MongoDBStore {
    users: Collection<UserDocument>,
    players: Collection<PlayerDocument>,
    teams: Collection<TeamDocument>,
    matches: Collection<MatchDocument>,
}

/// Document shape for identity records.
#[derive(Serialize, Deserialize, Clone, Debug)]
struct UserDocument {
    _id: ObjectId,
    name: String,
    email: String,
    password: String,
    #[serde(rename = "isAdmin")]
    is_admin: bool,
    #[serde(rename = "createdAt", with = "chrono_datetime_as_bson_datetime")]
    created_at: DateTime<Utc>,
}

/// Document shape for player records.
#[derive(Serialize, Deserialize, Clone, Debug)]
struct PlayerDocument {
    _id: ObjectId,
    name: String,
    team: String,
    role: String,
    #[serde(rename = "battingStyle", skip_serializing_if = "Option::is_none", default)]
    batting_style: Option<String>,
    #[serde(rename = "bowlingStyle", skip_serializing_if = "Option::is_none", default)]
    bowling_style: Option<String>,
    runs: i64,
    wickets: i64,
    matches: i64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    image: Option<String>,
    #[serde(rename = "createdAt", with = "chrono_datetime_as_bson_datetime")]
    created_at: DateTime<Utc>,
}

/// Document shape for team records.
#[derive(Serialize, Deserialize, Clone, Debug)]
struct TeamDocument {
    _id: ObjectId,
    name: String,
    ranking: i64,
    points: i64,
    wins: i64,
    losses: i64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    flag: Option<String>,
    #[serde(rename = "createdAt", with = "chrono_datetime_as_bson_datetime")]
    created_at: DateTime<Utc>,
}

/// Document shape for match records.
#[derive(Serialize, Deserialize, Clone, Debug)]
struct MatchDocument {
    _id: ObjectId,
    team1: String,
    team2: String,
    venue: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    time: Option<String>,
    status: MatchStatus,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    result: Option<String>,
    #[serde(rename = "createdAt", with = "chrono_datetime_as_bson_datetime")]
    created_at: DateTime<Utc>,
}

/// Map a driver error to our taxonomy, keeping unique-index violations
/// distinguishable from everything else.
fn map_mongo_error(e: mongodb::error::Error) -> StoreError {
    if let ErrorKind::Write(WriteFailure::WriteError(ref write_error)) = *e.kind {
        if write_error.code == 11000 {
            return StoreError::Duplicate(e.to_string());
        }
    }
    StoreError::Backend(e.to_string())
}

impl MongoDBStore {
    /// Creates a new `MongoDBStore` from the given config.
    /// It initializes client connections, sets up indexes, etc.
    pub async fn new(config: &MongoDBConfig) -> Result<Self, StoreError> {
        info!("Connecting to MongoDB at URI: {}", config.uri);

        let mut client_options = ClientOptions::parse(&config.uri)
            .await
            .map_err(|e| StoreError::Backend(format!("Failed to parse MongoDB URI: {}", e)))?;

        client_options.app_name = Some("CricHub".to_string());

        let client = Client::with_options(client_options)
            .map_err(|e| StoreError::Backend(format!("Failed to create MongoDB client: {}", e)))?;

        info!("MongoDB connection established successfully.");

        let database = client.database(&config.database);
        let users = database.collection::<UserDocument>("users");
        let players = database.collection::<PlayerDocument>("players");
        let teams = database.collection::<TeamDocument>("teams");
        let matches = database.collection::<MatchDocument>("matches");

        // Unique index on email: the store-level backstop for concurrent
        // registrations of the same address.
        let mut unique_on_email = IndexModel::default();
        unique_on_email.keys = doc! { "email": 1 };
        unique_on_email.options = Some(IndexOptions::builder().unique(true).build());

        users
            .create_index(unique_on_email, None)
            .await
            .map_err(|e| {
                StoreError::Backend(format!("Failed to create unique index on email: {}", e))
            })?;

        Ok(Self {
            users,
            players,
            teams,
            matches,
        })
    }

    fn user_to_doc(user: &User) -> UserDocument {
        UserDocument {
            _id: ObjectId::new(),
            name: user.name.clone(),
            email: user.email.clone(),
            password: user.password_hash.clone(),
            is_admin: user.is_admin,
            created_at: user.created_at,
        }
    }

    fn doc_to_user(doc: UserDocument) -> User {
        User {
            id: Some(doc._id.to_hex()),
            name: doc.name,
            email: doc.email,
            password_hash: doc.password,
            is_admin: doc.is_admin,
            created_at: doc.created_at,
        }
    }

    fn player_to_doc(player: &Player) -> PlayerDocument {
        PlayerDocument {
            _id: ObjectId::new(),
            name: player.name.clone(),
            team: player.team.clone(),
            role: player.role.clone(),
            batting_style: player.batting_style.clone(),
            bowling_style: player.bowling_style.clone(),
            runs: player.runs,
            wickets: player.wickets,
            matches: player.matches,
            image: player.image.clone(),
            created_at: player.created_at,
        }
    }

    fn doc_to_player(doc: PlayerDocument) -> Player {
        Player {
            id: Some(doc._id.to_hex()),
            name: doc.name,
            team: doc.team,
            role: doc.role,
            batting_style: doc.batting_style,
            bowling_style: doc.bowling_style,
            runs: doc.runs,
            wickets: doc.wickets,
            matches: doc.matches,
            image: doc.image,
            created_at: doc.created_at,
        }
    }

    fn team_to_doc(team: &Team) -> TeamDocument {
        TeamDocument {
            _id: ObjectId::new(),
            name: team.name.clone(),
            ranking: team.ranking,
            points: team.points,
            wins: team.wins,
            losses: team.losses,
            flag: team.flag.clone(),
            created_at: team.created_at,
        }
    }

    fn doc_to_team(doc: TeamDocument) -> Team {
        Team {
            id: Some(doc._id.to_hex()),
            name: doc.name,
            ranking: doc.ranking,
            points: doc.points,
            wins: doc.wins,
            losses: doc.losses,
            flag: doc.flag,
            created_at: doc.created_at,
        }
    }

    fn match_to_doc(fixture: &Match) -> MatchDocument {
        MatchDocument {
            _id: ObjectId::new(),
            team1: fixture.team1.clone(),
            team2: fixture.team2.clone(),
            venue: fixture.venue.clone(),
            date: fixture.date,
            time: fixture.time.clone(),
            status: fixture.status,
            result: fixture.result.clone(),
            created_at: fixture.created_at,
        }
    }

    fn doc_to_match(doc: MatchDocument) -> Match {
        Match {
            id: Some(doc._id.to_hex()),
            team1: doc.team1,
            team2: doc.team2,
            venue: doc.venue,
            date: doc.date,
            time: doc.time,
            status: doc.status,
            result: doc.result,
            created_at: doc.created_at,
        }
    }

    fn player_patch_doc(patch: &PlayerPatch) -> Document {
        let mut set = Document::new();
        if let Some(name) = &patch.name {
            set.insert("name", name.as_str());
        }
        if let Some(team) = &patch.team {
            set.insert("team", team.as_str());
        }
        if let Some(role) = &patch.role {
            set.insert("role", role.as_str());
        }
        if let Some(batting_style) = &patch.batting_style {
            set.insert("battingStyle", batting_style.as_str());
        }
        if let Some(bowling_style) = &patch.bowling_style {
            set.insert("bowlingStyle", bowling_style.as_str());
        }
        if let Some(runs) = patch.runs {
            set.insert("runs", runs);
        }
        if let Some(wickets) = patch.wickets {
            set.insert("wickets", wickets);
        }
        if let Some(matches) = patch.matches {
            set.insert("matches", matches);
        }
        if let Some(image) = &patch.image {
            set.insert("image", image.as_str());
        }
        set
    }

    fn team_patch_doc(patch: &TeamPatch) -> Document {
        let mut set = Document::new();
        if let Some(name) = &patch.name {
            set.insert("name", name.as_str());
        }
        if let Some(ranking) = patch.ranking {
            set.insert("ranking", ranking);
        }
        if let Some(points) = patch.points {
            set.insert("points", points);
        }
        if let Some(wins) = patch.wins {
            set.insert("wins", wins);
        }
        if let Some(losses) = patch.losses {
            set.insert("losses", losses);
        }
        if let Some(flag) = &patch.flag {
            set.insert("flag", flag.as_str());
        }
        set
    }

    fn match_patch_doc(patch: &MatchPatch) -> Document {
        let mut set = Document::new();
        if let Some(team1) = &patch.team1 {
            set.insert("team1", team1.as_str());
        }
        if let Some(team2) = &patch.team2 {
            set.insert("team2", team2.as_str());
        }
        if let Some(venue) = &patch.venue {
            set.insert("venue", venue.as_str());
        }
        if let Some(date) = patch.date {
            set.insert("date", BsonDateTime::from_chrono(date));
        }
        if let Some(time) = &patch.time {
            set.insert("time", time.as_str());
        }
        if let Some(status) = patch.status {
            set.insert("status", status.as_str());
        }
        if let Some(result) = &patch.result {
            set.insert("result", result.as_str());
        }
        set
    }

    fn post_update_options() -> FindOneAndUpdateOptions {
        FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build()
    }
}

#[async_trait]
impl Store for MongoDBStore {
    async fn insert_user(&self, user: &User) -> Result<User, StoreError> {
        let doc = Self::user_to_doc(user);
        self.users
            .insert_one(doc.clone(), None)
            .await
            .map_err(map_mongo_error)?;
        Ok(Self::doc_to_user(doc))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let found = self
            .users
            .find_one(doc! { "email": email }, None)
            .await
            .map_err(map_mongo_error)?;
        Ok(found.map(Self::doc_to_user))
    }

    async fn list_players(&self) -> Result<Vec<Player>, StoreError> {
        let options = FindOptions::builder().sort(doc! { "createdAt": -1 }).build();
        let mut cursor = self
            .players
            .find(doc! {}, options)
            .await
            .map_err(map_mongo_error)?;

        let mut players = Vec::new();
        while let Some(doc) = cursor.try_next().await.map_err(map_mongo_error)? {
            players.push(Self::doc_to_player(doc));
        }
        Ok(players)
    }

    async fn insert_player(&self, player: &Player) -> Result<Player, StoreError> {
        let doc = Self::player_to_doc(player);
        self.players
            .insert_one(doc.clone(), None)
            .await
            .map_err(map_mongo_error)?;
        Ok(Self::doc_to_player(doc))
    }

    async fn update_player(
        &self,
        id: &str,
        patch: &PlayerPatch,
    ) -> Result<Option<Player>, StoreError> {
        // Ids that don't parse can't match any document.
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(None);
        };
        let set = Self::player_patch_doc(patch);
        if set.is_empty() {
            let found = self
                .players
                .find_one(doc! { "_id": oid }, None)
                .await
                .map_err(map_mongo_error)?;
            return Ok(found.map(Self::doc_to_player));
        }
        let updated = self
            .players
            .find_one_and_update(doc! { "_id": oid }, doc! { "$set": set },
                Self::post_update_options())
            .await
            .map_err(map_mongo_error)?;
        Ok(updated.map(Self::doc_to_player))
    }

    async fn delete_player(&self, id: &str) -> Result<bool, StoreError> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(false);
        };
        let result = self
            .players
            .delete_one(doc! { "_id": oid }, None)
            .await
            .map_err(map_mongo_error)?;
        Ok(result.deleted_count > 0)
    }

    async fn list_teams(&self) -> Result<Vec<Team>, StoreError> {
        let options = FindOptions::builder().sort(doc! { "ranking": 1 }).build();
        let mut cursor = self
            .teams
            .find(doc! {}, options)
            .await
            .map_err(map_mongo_error)?;

        let mut teams = Vec::new();
        while let Some(doc) = cursor.try_next().await.map_err(map_mongo_error)? {
            teams.push(Self::doc_to_team(doc));
        }
        Ok(teams)
    }

    async fn insert_team(&self, team: &Team) -> Result<Team, StoreError> {
        let doc = Self::team_to_doc(team);
        self.teams
            .insert_one(doc.clone(), None)
            .await
            .map_err(map_mongo_error)?;
        Ok(Self::doc_to_team(doc))
    }

    async fn update_team(&self, id: &str, patch: &TeamPatch) -> Result<Option<Team>, StoreError> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(None);
        };
        let set = Self::team_patch_doc(patch);
        if set.is_empty() {
            let found = self
                .teams
                .find_one(doc! { "_id": oid }, None)
                .await
                .map_err(map_mongo_error)?;
            return Ok(found.map(Self::doc_to_team));
        }
        let updated = self
            .teams
            .find_one_and_update(doc! { "_id": oid }, doc! { "$set": set },
                Self::post_update_options())
            .await
            .map_err(map_mongo_error)?;
        Ok(updated.map(Self::doc_to_team))
    }

    async fn delete_team(&self, id: &str) -> Result<bool, StoreError> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(false);
        };
        let result = self
            .teams
            .delete_one(doc! { "_id": oid }, None)
            .await
            .map_err(map_mongo_error)?;
        Ok(result.deleted_count > 0)
    }

    async fn list_matches(&self) -> Result<Vec<Match>, StoreError> {
        let options = FindOptions::builder().sort(doc! { "date": 1 }).build();
        let mut cursor = self
            .matches
            .find(doc! {}, options)
            .await
            .map_err(map_mongo_error)?;

        let mut matches = Vec::new();
        while let Some(doc) = cursor.try_next().await.map_err(map_mongo_error)? {
            matches.push(Self::doc_to_match(doc));
        }
        Ok(matches)
    }

    async fn insert_match(&self, fixture: &Match) -> Result<Match, StoreError> {
        let doc = Self::match_to_doc(fixture);
        self.matches
            .insert_one(doc.clone(), None)
            .await
            .map_err(map_mongo_error)?;
        Ok(Self::doc_to_match(doc))
    }

    async fn update_match(
        &self,
        id: &str,
        patch: &MatchPatch,
    ) -> Result<Option<Match>, StoreError> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(None);
        };
        let set = Self::match_patch_doc(patch);
        if set.is_empty() {
            let found = self
                .matches
                .find_one(doc! { "_id": oid }, None)
                .await
                .map_err(map_mongo_error)?;
            return Ok(found.map(Self::doc_to_match));
        }
        let updated = self
            .matches
            .find_one_and_update(doc! { "_id": oid }, doc! { "$set": set },
                Self::post_update_options())
            .await
            .map_err(map_mongo_error)?;
        Ok(updated.map(Self::doc_to_match))
    }

    async fn delete_match(&self, id: &str) -> Result<bool, StoreError> {
        let Ok(oid) = ObjectId::parse_str(id) else {
            return Ok(false);
        };
        let result = self
            .matches
            .delete_one(doc! { "_id": oid }, None)
            .await
            .map_err(map_mongo_error)?;
        Ok(result.deleted_count > 0)
    }
}
