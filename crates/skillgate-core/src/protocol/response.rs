//! Response accumulator and outbound envelope.
//!
//! Every mutually-exclusive response slot is a tagged union behind a single
//! `Option`, so "last write wins within a group" is a property of the types
//! rather than a convention across nullable fields. Members of different
//! groups coexist.
//!
//! Callbacks never see the builder directly; the dispatcher hands each one
//! the capability trait matching its request type (`ResponseWriter` for
//! voice interactions, `AudioControl`/`AudioDirectives` for audio events),
//! so a launch handler cannot emit player directives and an audio handler
//! cannot emit speech.

use serde::Serialize;

/// Protocol version stamped on every outbound envelope.
pub const RESPONSE_VERSION: &str = "1.0";

// --------------------
// Exclusivity groups
// --------------------

/// Output speech: plain text or SSML markup, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum Speech {
    PlainText { text: String },
    #[serde(rename = "SSML")]
    Ssml { ssml: String },
}

/// Home-card group: exactly one shape at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum Card {
    Simple {
        title: String,
        content: String,
    },
    Standard {
        title: String,
        text: String,
        image: CardImage,
    },
    LinkAccount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardImage {
    pub small_image_url: String,
    pub large_image_url: String,
}

/// Reprompt wrapper; carries the same speech exclusivity independently of
/// the primary output speech.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reprompt {
    #[serde(rename = "outputSpeech")]
    pub output_speech: Speech,
}

/// Audio stream reference carried by a play directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stream {
    pub url: String,
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_previous_token: Option<String>,
    pub offset_in_milliseconds: i64,
}

/// Play-type directive group: at most one of the three behaviors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayDirective {
    ReplaceAll(Stream),
    Enqueue(Stream),
    ReplaceEnqueued(Stream),
}

/// Stop-or-clear directive group, independent of the play group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HaltDirective {
    Stop,
    ClearEnqueued,
    ClearAll,
}

// --------------------
// Wire directive shapes
// --------------------

/// Serialized directive object, tagged with the platform's fixed type
/// strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum Directive {
    #[serde(rename = "AudioPlayer.Play")]
    Play {
        #[serde(rename = "playBehavior")]
        play_behavior: &'static str,
        #[serde(rename = "audioItem")]
        audio_item: AudioItem,
    },
    #[serde(rename = "AudioPlayer.Stop")]
    Stop,
    #[serde(rename = "AudioPlayer.ClearQueue")]
    ClearQueue {
        #[serde(rename = "clearBehavior")]
        clear_behavior: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AudioItem {
    pub stream: Stream,
}

impl PlayDirective {
    fn into_directive(self) -> Directive {
        let (behavior, stream) = match self {
            PlayDirective::ReplaceAll(s) => ("REPLACE_ALL", s),
            PlayDirective::Enqueue(s) => ("ENQUEUE", s),
            PlayDirective::ReplaceEnqueued(s) => ("REPLACE_ENQUEUED", s),
        };
        Directive::Play {
            play_behavior: behavior,
            audio_item: AudioItem { stream },
        }
    }
}

impl HaltDirective {
    fn into_directive(self) -> Directive {
        match self {
            HaltDirective::Stop => Directive::Stop,
            HaltDirective::ClearEnqueued => Directive::ClearQueue {
                clear_behavior: "CLEAR_ENQUEUED",
            },
            HaltDirective::ClearAll => Directive::ClearQueue {
                clear_behavior: "CLEAR_ALL",
            },
        }
    }
}

// --------------------
// Capability views
// --------------------

/// Voice-interaction response surface (launch/intent callbacks).
pub trait ResponseWriter: Send {
    fn plain_text(&mut self, text: &str);
    fn ssml(&mut self, ssml: &str);

    fn simple_card(&mut self, title: &str, content: &str);
    fn standard_card(
        &mut self,
        title: &str,
        text: &str,
        small_image_url: &str,
        large_image_url: &str,
    );
    fn link_account_card(&mut self);

    fn reprompt_plain_text(&mut self, text: &str);
    fn reprompt_ssml(&mut self, ssml: &str);

    fn should_end_session(&mut self, value: bool);
}

/// Play-type directive surface.
pub trait AudioPlayer: Send {
    fn replace_all(&mut self, token: &str, url: &str, offset_in_milliseconds: i64);
    fn enqueue(
        &mut self,
        token: &str,
        url: &str,
        expected_previous_token: &str,
        offset_in_milliseconds: i64,
    );
    fn replace_enqueued(&mut self, token: &str, url: &str, offset_in_milliseconds: i64);
}

/// Stop-or-clear directive surface.
pub trait AudioControl: Send {
    fn stop(&mut self);
    fn clear_enqueued(&mut self);
    fn clear_all(&mut self);
}

/// Full audio directive surface (play + stop/clear).
pub trait AudioDirectives: AudioPlayer + AudioControl {}

impl<T: AudioPlayer + AudioControl> AudioDirectives for T {}

// --------------------
// Builder
// --------------------

/// Per-request response accumulator. Created fresh by the dispatcher,
/// written to by at most one callback, serialized once.
#[derive(Debug, Default)]
pub struct ResponseBuilder {
    speech: Option<Speech>,
    card: Option<Card>,
    reprompt: Option<Speech>,
    should_end_session: Option<bool>,
    play: Option<PlayDirective>,
    halt: Option<HaltDirective>,
}

impl ResponseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn stream(token: &str, url: &str, previous: Option<&str>, offset: i64) -> Stream {
        Stream {
            url: url.to_string(),
            token: token.to_string(),
            expected_previous_token: previous.map(str::to_string),
            offset_in_milliseconds: offset,
        }
    }

    /// Consume the builder, emitting only the fields that were set.
    pub fn into_envelope(self) -> ResponseEnvelope {
        let directives: Vec<Directive> = self
            .play
            .map(PlayDirective::into_directive)
            .into_iter()
            .chain(self.halt.map(HaltDirective::into_directive))
            .collect();

        ResponseEnvelope {
            version: RESPONSE_VERSION,
            response: ResponseBody {
                output_speech: self.speech,
                card: self.card,
                reprompt: self.reprompt.map(|s| Reprompt { output_speech: s }),
                directives: if directives.is_empty() {
                    None
                } else {
                    Some(directives)
                },
                should_end_session: self.should_end_session,
            },
        }
    }
}

impl ResponseWriter for ResponseBuilder {
    fn plain_text(&mut self, text: &str) {
        self.speech = Some(Speech::PlainText {
            text: text.to_string(),
        });
    }

    fn ssml(&mut self, ssml: &str) {
        self.speech = Some(Speech::Ssml {
            ssml: ssml.to_string(),
        });
    }

    fn simple_card(&mut self, title: &str, content: &str) {
        self.card = Some(Card::Simple {
            title: title.to_string(),
            content: content.to_string(),
        });
    }

    fn standard_card(
        &mut self,
        title: &str,
        text: &str,
        small_image_url: &str,
        large_image_url: &str,
    ) {
        self.card = Some(Card::Standard {
            title: title.to_string(),
            text: text.to_string(),
            image: CardImage {
                small_image_url: small_image_url.to_string(),
                large_image_url: large_image_url.to_string(),
            },
        });
    }

    fn link_account_card(&mut self) {
        self.card = Some(Card::LinkAccount);
    }

    fn reprompt_plain_text(&mut self, text: &str) {
        self.reprompt = Some(Speech::PlainText {
            text: text.to_string(),
        });
    }

    fn reprompt_ssml(&mut self, ssml: &str) {
        self.reprompt = Some(Speech::Ssml {
            ssml: ssml.to_string(),
        });
    }

    fn should_end_session(&mut self, value: bool) {
        self.should_end_session = Some(value);
    }
}

impl AudioPlayer for ResponseBuilder {
    fn replace_all(&mut self, token: &str, url: &str, offset_in_milliseconds: i64) {
        self.play = Some(PlayDirective::ReplaceAll(Self::stream(
            token,
            url,
            None,
            offset_in_milliseconds,
        )));
    }

    fn enqueue(
        &mut self,
        token: &str,
        url: &str,
        expected_previous_token: &str,
        offset_in_milliseconds: i64,
    ) {
        self.play = Some(PlayDirective::Enqueue(Self::stream(
            token,
            url,
            Some(expected_previous_token),
            offset_in_milliseconds,
        )));
    }

    fn replace_enqueued(&mut self, token: &str, url: &str, offset_in_milliseconds: i64) {
        self.play = Some(PlayDirective::ReplaceEnqueued(Self::stream(
            token,
            url,
            None,
            offset_in_milliseconds,
        )));
    }
}

impl AudioControl for ResponseBuilder {
    fn stop(&mut self) {
        self.halt = Some(HaltDirective::Stop);
    }

    fn clear_enqueued(&mut self) {
        self.halt = Some(HaltDirective::ClearEnqueued);
    }

    fn clear_all(&mut self) {
        self.halt = Some(HaltDirective::ClearAll);
    }
}

// --------------------
// Outbound envelope
// --------------------

/// Serializable response envelope (fixed platform contract).
#[derive(Debug, Serialize)]
pub struct ResponseEnvelope {
    version: &'static str,
    response: ResponseBody,
}

impl ResponseEnvelope {
    /// Envelope with an empty response body (`{"version":"1.0","response":{}}`).
    pub fn empty() -> Self {
        ResponseBuilder::new().into_envelope()
    }
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResponseBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    output_speech: Option<Speech>,
    #[serde(skip_serializing_if = "Option::is_none")]
    card: Option<Card>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reprompt: Option<Reprompt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    directives: Option<Vec<Directive>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    should_end_session: Option<bool>,
}
