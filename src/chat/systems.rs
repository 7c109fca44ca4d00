//! Chat systems (submit + apply).

use crate::chat::fetcher::start_chat_worker;
use crate::chat::types::{
    ChatChannels, ChatCommand, ChatConfig, ChatResult, ChatState, TRANSMISSION_ERROR,
};
use bevy::prelude::*;

pub fn setup_chat_worker(mut commands: Commands, config: Res<ChatConfig>) {
    if config.api_key.is_none() {
        warn!("[CHAT] no GEMINI_API_KEY or API_KEY set; chat replies will fail");
    }
    let channels = start_chat_worker(config.clone());
    info!("[INIT] chat worker started (model {})", config.model);
    commands.insert_resource(channels);
}

/// Sends the current input if the chat is free to take a question.
pub fn submit_chat_input(state: &mut ChatState, channels: Option<&ChatChannels>) {
    let Some((request_id, prompt)) = state.begin_submission() else {
        return;
    };
    let Some(channels) = channels else {
        warn!("[CHAT] worker not available");
        state.abandon(request_id, TRANSMISSION_ERROR);
        return;
    };
    if let Err(err) = channels
        .cmd_tx
        .send(ChatCommand::Ask { request_id, prompt })
    {
        warn!("[CHAT] failed to queue question: {}", err);
        state.abandon(request_id, TRANSMISSION_ERROR);
    }
}

pub fn apply_chat_results(mut state: ResMut<ChatState>, channels: Option<Res<ChatChannels>>) {
    let Some(channels) = channels else { return };
    let Ok(guard) = channels.res_rx.lock() else {
        return;
    };

    while let Ok(ChatResult { request_id, text }) = guard.try_recv() {
        if !state.receive_reply(request_id, &text) {
            debug!("[CHAT] dropping stale reply {}", request_id);
        }
    }
}

/// Each dashboard session starts a fresh conversation.
pub fn reset_chat(mut state: ResMut<ChatState>) {
    state.restart();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex, mpsc};

    fn channels() -> (
        ChatChannels,
        mpsc::Receiver<ChatCommand>,
        mpsc::Sender<ChatResult>,
    ) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (res_tx, res_rx) = mpsc::channel();
        (
            ChatChannels {
                cmd_tx,
                res_rx: Arc::new(Mutex::new(res_rx)),
            },
            cmd_rx,
            res_tx,
        )
    }

    #[test]
    fn submit_queues_question() {
        let (channels, cmd_rx, _res_tx) = channels();
        let mut state = ChatState::default();
        state.input = "How big is Eros?".into();
        submit_chat_input(&mut state, Some(&channels));

        let ChatCommand::Ask { request_id, prompt } = cmd_rx.try_recv().unwrap();
        assert_eq!(request_id, 1);
        assert_eq!(prompt, "How big is Eros?");
        assert!(state.awaiting_reply());
    }

    #[test]
    fn missing_worker_answers_with_error() {
        let mut state = ChatState::default();
        state.input = "hello".into();
        submit_chat_input(&mut state, None);
        assert!(!state.awaiting_reply());
        assert_eq!(state.messages.last().unwrap().text, TRANSMISSION_ERROR);
    }

    #[test]
    fn replies_are_applied_once() {
        use bevy::ecs::system::RunSystemOnce;

        let (channels, _cmd_rx, res_tx) = channels();
        let mut state = ChatState::default();
        state.input = "hello".into();
        submit_chat_input(&mut state, Some(&channels));

        let mut world = World::new();
        world.insert_resource(state);
        world.insert_resource(channels);
        res_tx
            .send(ChatResult {
                request_id: 99,
                text: "stale".into(),
            })
            .unwrap();
        res_tx
            .send(ChatResult {
                request_id: 1,
                text: "Hi there".into(),
            })
            .unwrap();
        world.run_system_once(apply_chat_results).unwrap();

        let state = world.resource::<ChatState>();
        assert!(!state.awaiting_reply());
        let texts: Vec<_> = state.messages.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts.last(), Some(&"Hi there"));
        assert!(!texts.contains(&"stale"));
    }
}
