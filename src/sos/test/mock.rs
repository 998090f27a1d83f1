use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use serenity::async_trait;

use crate::error::AppError;
use crate::gateway::{ChatGateway, MessageRef};
use crate::sos::render::SummaryView;

/// In-memory gateway double with scriptable failures.
///
/// Cloning shares the underlying state, so tests keep one handle for
/// assertions while the lifecycle owns another.
#[derive(Clone, Default)]
pub struct MockGateway {
    state: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    deny_permissions: bool,
    voice_channel_names: Vec<String>,
    next_id: u64,
    created_channels: Vec<CreatedChannel>,
    deleted_channels: Vec<u64>,
    member_counts: HashMap<u64, usize>,
    member_count_unavailable: bool,
    fail_destinations: HashSet<u64>,
    messages: HashMap<MessageRef, SummaryView>,
    deleted_messages: Vec<MessageRef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedChannel {
    pub id: u64,
    pub name: String,
    pub user_limit: u32,
    pub parent_id: Option<u64>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the permission precondition fail.
    pub fn deny_permissions(&self) {
        self.state.lock().unwrap().deny_permissions = true;
    }

    /// Seeds the voice channel listing returned for every guild.
    pub fn set_voice_channel_names(&self, names: &[&str]) {
        self.state.lock().unwrap().voice_channel_names =
            names.iter().map(|name| name.to_string()).collect();
    }

    /// Makes `post_summary` fail for the given destination channel.
    pub fn fail_destination(&self, channel_id: u64) {
        self.state.lock().unwrap().fail_destinations.insert(channel_id);
    }

    pub fn set_member_count(&self, channel_id: u64, count: usize) {
        self.state.lock().unwrap().member_counts.insert(channel_id, count);
    }

    /// Makes every occupancy query fail.
    pub fn make_member_count_unavailable(&self) {
        self.state.lock().unwrap().member_count_unavailable = true;
    }

    pub fn created_channels(&self) -> Vec<CreatedChannel> {
        self.state.lock().unwrap().created_channels.clone()
    }

    pub fn deleted_channels(&self) -> Vec<u64> {
        self.state.lock().unwrap().deleted_channels.clone()
    }

    pub fn deleted_messages(&self) -> Vec<MessageRef> {
        self.state.lock().unwrap().deleted_messages.clone()
    }

    /// Latest rendered views of every live broadcast copy.
    pub fn live_views(&self) -> Vec<SummaryView> {
        self.state.lock().unwrap().messages.values().cloned().collect()
    }
}

#[async_trait]
impl ChatGateway for MockGateway {
    async fn check_broadcast_permissions(&self, _guild_id: u64) -> Result<(), AppError> {
        if self.state.lock().unwrap().deny_permissions {
            return Err(AppError::MissingPermissions("Manage Channels".to_string()));
        }
        Ok(())
    }

    async fn voice_channel_names(&self, _guild_id: u64) -> Result<Vec<String>, AppError> {
        Ok(self.state.lock().unwrap().voice_channel_names.clone())
    }

    async fn create_voice_channel(
        &self,
        _guild_id: u64,
        name: &str,
        user_limit: u32,
        parent_id: Option<u64>,
    ) -> Result<u64, AppError> {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = 9000 + state.next_id;
        state.created_channels.push(CreatedChannel {
            id,
            name: name.to_string(),
            user_limit,
            parent_id,
        });
        state.voice_channel_names.push(name.to_string());
        Ok(id)
    }

    async fn delete_voice_channel(&self, channel_id: u64) -> Result<(), AppError> {
        self.state.lock().unwrap().deleted_channels.push(channel_id);
        Ok(())
    }

    async fn create_invite(&self, channel_id: u64, _max_age_secs: u32) -> Result<String, AppError> {
        Ok(format!("https://discord.gg/mock-{channel_id}"))
    }

    async fn voice_member_count(
        &self,
        _guild_id: u64,
        channel_id: u64,
    ) -> Result<usize, AppError> {
        let state = self.state.lock().unwrap();
        if state.member_count_unavailable {
            return Err(AppError::InternalError("voice state unavailable".to_string()));
        }
        Ok(state.member_counts.get(&channel_id).copied().unwrap_or(0))
    }

    async fn post_summary(
        &self,
        channel_id: u64,
        view: &SummaryView,
    ) -> Result<MessageRef, AppError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_destinations.contains(&channel_id) {
            return Err(AppError::NotFound(format!("channel {channel_id}")));
        }
        state.next_id += 1;
        let message = MessageRef {
            channel_id,
            message_id: 5000 + state.next_id,
        };
        state.messages.insert(message, view.clone());
        Ok(message)
    }

    async fn edit_summary(
        &self,
        message: MessageRef,
        view: &SummaryView,
    ) -> Result<(), AppError> {
        let mut state = self.state.lock().unwrap();
        match state.messages.get_mut(&message) {
            Some(stored) => {
                *stored = view.clone();
                Ok(())
            }
            None => Err(AppError::NotFound(format!(
                "message {} in channel {}",
                message.message_id, message.channel_id
            ))),
        }
    }

    async fn delete_message(&self, message: MessageRef) -> Result<(), AppError> {
        let mut state = self.state.lock().unwrap();
        state.messages.remove(&message);
        state.deleted_messages.push(message);
        Ok(())
    }
}
