// Single-session playback state machine shared by the web and desktop builds.
use dioxus::logger::tracing::{debug, error, info};
use futures_channel::mpsc::UnboundedSender;

use super::events::{SessionToken, StreamEvent, StreamEventKind, StreamEvents};
use super::fault::PlaybackFault;
use crate::characters::CharacterRegistry;

/// One in-flight clip as the controller sees it.
pub trait AudioStream {
    fn play(&mut self);
    fn pause(&mut self);
    /// Seek back to the start of the clip.
    fn rewind(&mut self);
    fn is_paused(&self) -> bool;
}

/// Opens streams. Completion and failure are reported later through the
/// `events` sender, never through the return value of `play`.
pub trait StreamBackend {
    type Stream: AudioStream;

    fn open(&mut self, location: &str, events: StreamEvents) -> Result<Self::Stream, String>;
}

/// The avatar a request came from. Equality is element identity.
pub trait AvatarElement: PartialEq {
    fn set_playing(&self, playing: bool);
    fn show_notice(&self, message: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayOutcome {
    Started(SessionToken),
    /// The request hit the avatar that was already playing.
    Stopped,
    Failed(PlaybackFault),
}

struct Session<S, E> {
    token: SessionToken,
    character: String,
    stream: S,
    element: E,
}

impl<S: AudioStream, E: AvatarElement> Session<S, E> {
    fn halt(&mut self) {
        self.stream.pause();
        self.stream.rewind();
        self.element.set_playing(false);
    }
}

pub struct PlaybackController<B: StreamBackend, E: AvatarElement> {
    registry: CharacterRegistry,
    backend: B,
    events: UnboundedSender<StreamEvent>,
    session: Option<Session<B::Stream, E>>,
    next_token: u64,
}

impl<B: StreamBackend, E: AvatarElement> PlaybackController<B, E> {
    pub fn new(
        registry: CharacterRegistry,
        backend: B,
        events: UnboundedSender<StreamEvent>,
    ) -> Self {
        Self {
            registry,
            backend,
            events,
            session: None,
            next_token: 1,
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    #[cfg(test)]
    pub fn playing_element(&self) -> Option<&E> {
        self.session.as_ref().map(|s| &s.element)
    }

    #[cfg(test)]
    pub fn current_token(&self) -> Option<SessionToken> {
        self.session.as_ref().map(|s| s.token)
    }

    #[cfg(test)]
    pub fn is_paused(&self) -> bool {
        self.session
            .as_ref()
            .map(|s| s.stream.is_paused())
            .unwrap_or(false)
    }

    /// Play `character_id` on `element`, stopping whatever was playing.
    /// Re-triggering the playing element only stops it.
    pub fn request_play(&mut self, character_id: &str, element: E) -> PlayOutcome {
        if let Some(mut previous) = self.session.take() {
            previous.halt();
            if previous.element == element {
                debug!(character = %previous.character, token = %previous.token, "toggle-stop");
                return PlayOutcome::Stopped;
            }
            debug!(character = %previous.character, token = %previous.token, "superseded");
        }

        let Some(location) = self.registry.resolve(character_id) else {
            let fault = PlaybackFault::UnknownCharacter(character_id.to_string());
            report(&element, &fault);
            return PlayOutcome::Failed(fault);
        };

        let token = SessionToken(self.next_token);
        self.next_token += 1;

        let events = StreamEvents::new(token, self.events.clone());
        let mut stream = match self.backend.open(location, events) {
            Ok(stream) => stream,
            Err(detail) => {
                let fault = PlaybackFault::load(character_id, detail);
                report(&element, &fault);
                return PlayOutcome::Failed(fault);
            }
        };

        element.set_playing(true);
        stream.play();
        info!(character = %character_id, %location, %token, "playback started");

        self.session = Some(Session {
            token,
            character: character_id.to_string(),
            stream,
            element,
        });
        PlayOutcome::Started(token)
    }

    /// Apply a stream notification. Returns `false` when it belonged to a
    /// session that no longer exists.
    pub fn handle_event(&mut self, event: StreamEvent) -> bool {
        match &self.session {
            Some(session) if session.token == event.token => {}
            _ => {
                debug!(token = %event.token, kind = ?event.kind, "ignoring stale stream event");
                return false;
            }
        }
        let Some(session) = self.session.take() else {
            return false;
        };

        session.element.set_playing(false);
        match event.kind {
            StreamEventKind::Completed => {
                info!(character = %session.character, token = %session.token, "playback completed");
            }
            StreamEventKind::LoadFailed(detail) => {
                report(&session.element, &PlaybackFault::load(&session.character, detail));
            }
            StreamEventKind::StartRejected(detail) => {
                report(
                    &session.element,
                    &PlaybackFault::rejected(&session.character, detail),
                );
            }
        }
        true
    }

    /// Pause or resume the active clip. Returns `false` when idle.
    pub fn toggle_pause(&mut self) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };

        if session.stream.is_paused() {
            session.stream.play();
            session.element.set_playing(true);
        } else {
            session.stream.pause();
            session.element.set_playing(false);
        }
        true
    }

    /// Stop and rewind the active clip and forget the session.
    pub fn stop_and_clear(&mut self) -> bool {
        let Some(mut session) = self.session.take() else {
            return false;
        };
        session.halt();
        debug!(character = %session.character, token = %session.token, "stopped");
        true
    }
}

fn report<E: AvatarElement>(element: &E, fault: &PlaybackFault) {
    error!(%fault, "audio playback fault");
    element.show_notice(fault.notice());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::events::stream_channel;
    use futures_channel::mpsc::UnboundedReceiver;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum Mark {
        Playing(&'static str, bool),
        Notice(&'static str, String),
    }

    #[derive(Clone)]
    struct FakeElement {
        name: &'static str,
        journal: Rc<RefCell<Vec<Mark>>>,
    }

    impl PartialEq for FakeElement {
        fn eq(&self, other: &Self) -> bool {
            self.name == other.name
        }
    }

    impl AvatarElement for FakeElement {
        fn set_playing(&self, playing: bool) {
            self.journal.borrow_mut().push(Mark::Playing(self.name, playing));
        }

        fn show_notice(&self, message: &str) {
            self.journal
                .borrow_mut()
                .push(Mark::Notice(self.name, message.to_string()));
        }
    }

    #[derive(Debug, Default)]
    struct StreamRecord {
        location: String,
        playing: bool,
        position: f64,
        plays: usize,
    }

    type Streams = Rc<RefCell<Vec<StreamRecord>>>;

    struct FakeStream {
        index: usize,
        streams: Streams,
    }

    impl AudioStream for FakeStream {
        fn play(&mut self) {
            let mut streams = self.streams.borrow_mut();
            streams[self.index].playing = true;
            streams[self.index].plays += 1;
        }

        fn pause(&mut self) {
            self.streams.borrow_mut()[self.index].playing = false;
        }

        fn rewind(&mut self) {
            self.streams.borrow_mut()[self.index].position = 0.0;
        }

        fn is_paused(&self) -> bool {
            !self.streams.borrow()[self.index].playing
        }
    }

    #[derive(Default)]
    struct FakeBackend {
        streams: Streams,
        refuse: bool,
    }

    impl StreamBackend for FakeBackend {
        type Stream = FakeStream;

        fn open(&mut self, location: &str, _events: StreamEvents) -> Result<FakeStream, String> {
            if self.refuse {
                return Err("unsupported source".to_string());
            }
            let mut streams = self.streams.borrow_mut();
            streams.push(StreamRecord {
                location: location.to_string(),
                ..Default::default()
            });
            Ok(FakeStream {
                index: streams.len() - 1,
                streams: self.streams.clone(),
            })
        }
    }

    struct Harness {
        controller: PlaybackController<FakeBackend, FakeElement>,
        streams: Streams,
        journal: Rc<RefCell<Vec<Mark>>>,
        _rx: UnboundedReceiver<StreamEvent>,
    }

    impl Harness {
        fn new() -> Self {
            let registry = CharacterRegistry::from_pairs([
                ("hero", "hero.mp3"),
                ("villain", "villain.mp3"),
            ])
            .unwrap();
            let backend = FakeBackend::default();
            let streams = backend.streams.clone();
            let (tx, rx) = stream_channel();
            Self {
                controller: PlaybackController::new(registry, backend, tx),
                streams,
                journal: Rc::new(RefCell::new(Vec::new())),
                _rx: rx,
            }
        }

        fn element(&self, name: &'static str) -> FakeElement {
            FakeElement {
                name,
                journal: self.journal.clone(),
            }
        }

        fn marks(&self) -> Vec<Mark> {
            self.journal.borrow().clone()
        }

        fn started(&mut self, character: &str, name: &'static str) -> SessionToken {
            let element = self.element(name);
            match self.controller.request_play(character, element) {
                PlayOutcome::Started(token) => token,
                other => panic!("expected playback to start, got {other:?}"),
            }
        }
    }

    fn event(token: SessionToken, kind: StreamEventKind) -> StreamEvent {
        StreamEvent { token, kind }
    }

    #[test]
    fn unknown_character_never_opens_a_stream() {
        let mut h = Harness::new();
        let ghost = h.element("ghost");

        let outcome = h.controller.request_play("ghost", ghost);

        assert_eq!(
            outcome,
            PlayOutcome::Failed(PlaybackFault::UnknownCharacter("ghost".into()))
        );
        assert!(h.streams.borrow().is_empty());
        assert!(!h.controller.is_active());
        assert_eq!(
            h.marks(),
            vec![Mark::Notice("ghost", "Audio not found".to_string())]
        );
    }

    #[test]
    fn hero_scenario_toggle_then_unknown() {
        let mut h = Harness::new();

        h.started("hero", "elem_h");
        assert!(h.controller.is_active());
        assert_eq!(h.controller.playing_element().map(|e| e.name), Some("elem_h"));
        assert_eq!(h.streams.borrow()[0].location, "hero.mp3");
        assert!(h.streams.borrow()[0].playing);

        let again = h.element("elem_h");
        assert_eq!(h.controller.request_play("hero", again), PlayOutcome::Stopped);
        assert!(!h.controller.is_active());
        assert_eq!(h.streams.borrow().len(), 1);
        assert!(!h.streams.borrow()[0].playing);

        let ghost = h.element("elem_g");
        h.controller.request_play("ghost", ghost);
        assert!(!h.controller.is_active());

        assert_eq!(
            h.marks(),
            vec![
                Mark::Playing("elem_h", true),
                Mark::Playing("elem_h", false),
                Mark::Notice("elem_g", "Audio not found".to_string()),
            ]
        );
    }

    #[test]
    fn switching_avatars_clears_previous_flag_first() {
        let mut h = Harness::new();
        h.started("hero", "a");
        h.streams.borrow_mut()[0].position = 4.2;

        h.started("villain", "b");

        assert_eq!(
            h.marks(),
            vec![
                Mark::Playing("a", true),
                Mark::Playing("a", false),
                Mark::Playing("b", true),
            ]
        );
        let streams = h.streams.borrow();
        assert!(!streams[0].playing);
        assert_eq!(streams[0].position, 0.0);
        assert!(streams[1].playing);
        assert_eq!(h.controller.playing_element().map(|e| e.name), Some("b"));
    }

    #[test]
    fn same_character_on_another_element_restarts() {
        let mut h = Harness::new();
        let first = h.started("hero", "a");
        let second = h.started("hero", "b");

        assert_ne!(first, second);
        assert_eq!(h.streams.borrow().len(), 2);
        assert_eq!(h.controller.current_token(), Some(second));
    }

    #[test]
    fn completion_clears_session_and_allows_fresh_start() {
        let mut h = Harness::new();
        let token = h.started("hero", "a");

        assert!(h.controller.handle_event(event(token, StreamEventKind::Completed)));
        assert!(!h.controller.is_active());
        assert_eq!(h.marks().last(), Some(&Mark::Playing("a", false)));

        // Same element again starts a new clip instead of toggling off.
        let next = h.started("hero", "a");
        assert_ne!(next, token);
        assert_eq!(h.streams.borrow().len(), 2);
    }

    #[test]
    fn load_failure_shows_missing_notice() {
        let mut h = Harness::new();
        let token = h.started("villain", "v");

        h.controller.handle_event(event(
            token,
            StreamEventKind::LoadFailed("MEDIA_ERR_SRC_NOT_SUPPORTED".into()),
        ));

        assert!(!h.controller.is_active());
        assert_eq!(
            h.marks(),
            vec![
                Mark::Playing("v", true),
                Mark::Playing("v", false),
                Mark::Notice("v", "Audio file missing".to_string()),
            ]
        );
    }

    #[test]
    fn start_rejection_shows_playback_error() {
        let mut h = Harness::new();
        let token = h.started("hero", "h");

        h.controller.handle_event(event(
            token,
            StreamEventKind::StartRejected("NotAllowedError".into()),
        ));

        assert!(!h.controller.is_active());
        assert_eq!(
            h.marks().last(),
            Some(&Mark::Notice("h", "Playback error".to_string()))
        );
    }

    #[test]
    fn backend_open_failure_is_a_load_error() {
        let mut h = Harness::new();
        h.controller.backend.refuse = true;
        let element = h.element("h");

        let outcome = h.controller.request_play("hero", element);

        assert_eq!(
            outcome,
            PlayOutcome::Failed(PlaybackFault::load("hero", "unsupported source"))
        );
        assert!(!h.controller.is_active());
        assert_eq!(
            h.marks(),
            vec![Mark::Notice("h", "Audio file missing".to_string())]
        );
    }

    #[test]
    fn stale_events_are_ignored() {
        let mut h = Harness::new();
        let old = h.started("hero", "a");
        let current = h.started("villain", "b");
        let before = h.marks();

        assert!(!h.controller.handle_event(event(old, StreamEventKind::Completed)));
        assert!(!h
            .controller
            .handle_event(event(old, StreamEventKind::LoadFailed("late".into()))));

        assert_eq!(h.controller.current_token(), Some(current));
        assert_eq!(h.marks(), before);
    }

    #[test]
    fn events_after_stop_are_ignored() {
        let mut h = Harness::new();
        let token = h.started("hero", "a");
        h.controller.stop_and_clear();
        let before = h.marks();

        assert!(!h.controller.handle_event(event(token, StreamEventKind::Completed)));
        assert_eq!(h.marks(), before);
    }

    #[test]
    fn toggle_pause_when_idle_is_noop() {
        let mut h = Harness::new();

        assert!(!h.controller.toggle_pause());
        assert!(!h.controller.is_active());
        assert!(h.marks().is_empty());
    }

    #[test]
    fn toggle_pause_flips_stream_and_flag() {
        let mut h = Harness::new();
        h.started("hero", "a");

        assert!(h.controller.toggle_pause());
        assert!(h.controller.is_paused());
        assert!(h.controller.is_active());

        assert!(h.controller.toggle_pause());
        assert!(!h.controller.is_paused());
        assert_eq!(h.streams.borrow()[0].plays, 2);

        assert_eq!(
            h.marks(),
            vec![
                Mark::Playing("a", true),
                Mark::Playing("a", false),
                Mark::Playing("a", true),
            ]
        );
    }

    #[test]
    fn paused_element_retrigger_still_toggles_off() {
        let mut h = Harness::new();
        h.started("hero", "a");
        h.controller.toggle_pause();

        let again = h.element("a");
        assert_eq!(h.controller.request_play("hero", again), PlayOutcome::Stopped);
        assert!(!h.controller.is_active());
    }

    #[test]
    fn stop_and_clear_rewinds_to_start() {
        let mut h = Harness::new();
        h.started("hero", "a");
        h.streams.borrow_mut()[0].position = 12.5;

        assert!(h.controller.stop_and_clear());

        let streams = h.streams.borrow();
        assert_eq!(streams[0].position, 0.0);
        assert!(!streams[0].playing);
        assert!(!h.controller.is_active());
        assert_eq!(h.marks().last(), Some(&Mark::Playing("a", false)));
    }

    #[test]
    fn stop_and_clear_when_idle_is_noop() {
        let mut h = Harness::new();
        assert!(!h.controller.stop_and_clear());
        assert!(h.marks().is_empty());
    }

    #[test]
    fn unknown_request_while_playing_leaves_no_session() {
        let mut h = Harness::new();
        h.started("hero", "a");
        let ghost = h.element("g");

        h.controller.request_play("ghost", ghost);

        assert!(!h.controller.is_active());
        assert!(!h.streams.borrow()[0].playing);
        assert_eq!(
            h.marks(),
            vec![
                Mark::Playing("a", true),
                Mark::Playing("a", false),
                Mark::Notice("g", "Audio not found".to_string()),
            ]
        );
    }
}
