use std::fs;
use std::io::Cursor;

use chrono::NaiveDateTime;
use tempfile::TempDir;

use qabot_chat::chat_log::TIMESTAMP_FORMAT;
use qabot_chat::{menu, train, ChatLog, ChatSession, MenuChoice, Reply, Responder};
use qabot_core::config::Settings;
use qabot_core::Error;

const DATASET: &str = r#"[
    {"question": "what is your name", "answer": "I am a bot"},
    {"question": "how are you", "answer": "Doing well, thanks"},
    {"question": "what can you do", "answer": "I answer questions"},
    {"question": "who made you", "answer": "A curious developer"}
]"#;

fn setup(dataset: &str) -> (TempDir, Settings) {
    let tmp = TempDir::new().unwrap();
    let settings = Settings::default().resolved(tmp.path());
    fs::write(&settings.paths.dataset, dataset).unwrap();
    (tmp, settings)
}

fn trained(dataset: &str) -> (TempDir, Settings, Responder) {
    let (tmp, settings) = setup(dataset);
    train(&settings).expect("train");
    let responder = Responder::open(&settings).expect("open");
    (tmp, settings, responder)
}

/// Parses a `[YYYY-MM-DD HH:MM:SS] Who: text` log line into its timestamp and remainder.
fn split_log_line(line: &str) -> (NaiveDateTime, &str) {
    let (ts, rest) = line.strip_prefix('[').and_then(|l| l.split_once("] ")).expect("timestamp prefix");
    (NaiveDateTime::parse_from_str(ts, TIMESTAMP_FORMAT).expect("timestamp format"), rest)
}

#[test]
fn single_record_corpus_answers_and_falls_back() {
    let (_tmp, _settings, responder) = trained(r#"[{"question":"what is your name","answer":"I am a bot"}]"#);

    let reply = responder.respond("what is your name");
    assert_eq!(reply.text(), "I am a bot");
    assert!((reply.score().unwrap() - 1.0).abs() < 1e-5);

    let reply = responder.respond("xyzzy unrelated gibberish");
    assert_eq!(reply.text(), "Sorry, I don't understand.");
    assert!(matches!(reply, Reply::Fallback { .. }));
}

#[test]
fn every_stored_question_returns_its_own_answer() {
    let (_tmp, settings, responder) = trained(DATASET);
    let records = qabot_core::dataset::load_records(&settings.paths.dataset).unwrap();
    for (i, record) in records.iter().enumerate() {
        match responder.respond(&record.question.to_uppercase()) {
            Reply::Answer { text, index, score } => {
                assert_eq!(index, i);
                assert_eq!(text, record.answer);
                assert!((score - 1.0).abs() < 1e-5);
            }
            other => panic!("expected answer for {:?}, got {:?}", record.question, other),
        }
    }
}

// Weights on DATASET: idf = ln(5 / (1 + df)) + 1, so df=1 -> 1.9163, "what" -> 1.5108, "you" -> 1.2231.
#[test]
fn paraphrases_pick_the_expected_record() {
    let (_tmp, _settings, responder) = trained(DATASET);

    // name . "what is your name" = 1.9163 / sqrt(1.5108^2 + 3 * 1.9163^2)
    match responder.respond("name") {
        Reply::Answer { text, index, score } => {
            assert_eq!(index, 0);
            assert_eq!(text, "I am a bot");
            assert!((score - 0.5255).abs() < 1e-4, "score {}", score);
        }
        other => panic!("expected answer, got {:?}", other),
    }

    // "do" appears twice in the query, so its weight doubles.
    match responder.respond("what do you do") {
        Reply::Answer { text, index, score } => {
            assert_eq!(index, 2);
            assert_eq!(text, "I answer questions");
            assert!((score - 0.7761).abs() < 1e-4, "score {}", score);
        }
        other => panic!("expected answer, got {:?}", other),
    }

    // Ties with "who made you" at 0.5846; the earlier record wins.
    match responder.respond("who are you") {
        Reply::Answer { index, score, .. } => {
            assert_eq!(index, 1);
            assert!((score - 0.5846).abs() < 1e-4, "score {}", score);
        }
        other => panic!("expected answer, got {:?}", other),
    }
}

#[test]
fn score_equal_to_threshold_still_answers() {
    let (_tmp, mut settings, responder) = trained(DATASET);
    let score = responder.respond("name").score().unwrap();

    settings.responder.threshold = score;
    let at = Responder::open(&settings).unwrap();
    assert_eq!(
        at.respond("name"),
        Reply::Answer { text: "I am a bot".to_string(), index: 0, score }
    );

    settings.responder.threshold = f32::from_bits(score.to_bits() + 1);
    let above = Responder::open(&settings).unwrap();
    assert_eq!(
        above.respond("name"),
        Reply::Fallback { text: "Sorry, I don't understand.".to_string(), score }
    );
}

#[test]
fn higher_threshold_turns_partial_match_into_fallback() {
    let (_tmp, mut settings) = setup(DATASET);
    train(&settings).unwrap();
    let partial = "what is the answer";
    let score = Responder::open(&settings).unwrap().respond(partial).score().unwrap();
    assert!(score > 0.0 && score < 1.0, "partial score {}", score);

    settings.responder.threshold = (score + 0.01).min(1.0);
    let strict = Responder::open(&settings).unwrap();
    assert_eq!(strict.respond(partial), Reply::Fallback { text: "Sorry, I don't understand.".to_string(), score });
}

#[test]
fn exit_keywords_end_the_session_regardless_of_corpus() {
    let (_tmp, _settings, responder) = trained(r#"[{"question":"bye bye","answer":"stored bye"}, {"question":"quit smoking","answer":"good idea"}]"#);
    for input in ["bye", "EXIT", "Quit", "  bye  "] {
        assert_eq!(responder.respond(input), Reply::Goodbye { text: "Goodbye!".to_string() });
    }
}

#[test]
fn session_logs_every_turn_and_stops_at_exit() {
    let (_tmp, settings, responder) = trained(DATASET);
    let log = ChatLog::new(&settings.paths.log);
    let session = ChatSession::new(&responder, &log);

    let input = Cursor::new("What is your name\n\nxyzzy\nBye\nhow are you\n");
    let mut output = Vec::new();
    let summary = session.run(input, &mut output).expect("run");
    assert_eq!(summary.turns, 3);
    assert!(summary.ended_by_keyword);

    let printed = String::from_utf8(output).unwrap();
    assert!(printed.contains("Bot: I am a bot"));
    assert!(printed.contains("Bot: Sorry, I don't understand."));
    assert!(printed.contains("Bot: Goodbye!"));
    assert!(!printed.contains("Doing well"), "nothing is answered after exit");

    let logged = fs::read_to_string(&settings.paths.log).unwrap();
    let lines: Vec<&str> = logged.lines().collect();
    assert_eq!(lines.len(), 9, "three turns of You/Bot/blank");
    let expected = [
        ("You: What is your name", "Bot: I am a bot"),
        ("You: xyzzy", "Bot: Sorry, I don't understand."),
        ("You: Bye", "Bot: Goodbye!"),
    ];
    for (turn, (you, bot)) in expected.iter().enumerate() {
        let (t1, rest1) = split_log_line(lines[turn * 3]);
        let (t2, rest2) = split_log_line(lines[turn * 3 + 1]);
        assert_eq!(rest1, *you);
        assert_eq!(rest2, *bot);
        assert_eq!(t1, t2);
        assert_eq!(lines[turn * 3 + 2], "");
    }
}

#[test]
fn session_ends_quietly_at_end_of_input() {
    let (_tmp, settings, responder) = trained(DATASET);
    let log = ChatLog::new(&settings.paths.log);
    let summary = ChatSession::new(&responder, &log).run(Cursor::new("how are you"), Vec::new()).unwrap();
    assert_eq!(summary.turns, 1);
    assert!(!summary.ended_by_keyword);
    assert!(fs::read_to_string(&settings.paths.log).unwrap().contains("Bot: Doing well, thanks"));
}

#[test]
fn chat_log_appends_with_fixed_format() {
    let tmp = TempDir::new().unwrap();
    let log = ChatLog::new(tmp.path().join("logs/history.txt"));
    let at = NaiveDateTime::parse_from_str("2024-03-05 07:08:09", TIMESTAMP_FORMAT).unwrap();
    log.append_at(at, "hello", "Hi there").unwrap();
    log.append_at(at, "bye", "Goodbye!").unwrap();
    assert_eq!(
        fs::read_to_string(log.path()).unwrap(),
        "[2024-03-05 07:08:09] You: hello\n[2024-03-05 07:08:09] Bot: Hi there\n\n\
         [2024-03-05 07:08:09] You: bye\n[2024-03-05 07:08:09] Bot: Goodbye!\n\n"
    );
}

#[test]
fn training_without_dataset_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    let settings = Settings::default().resolved(tmp.path());
    assert!(matches!(train(&settings).unwrap_err(), Error::MissingInput(_)));
    assert!(!settings.paths.model.exists());
}

#[test]
fn chat_before_training_is_refused() {
    let tmp = TempDir::new().unwrap();
    let settings = Settings::default().resolved(tmp.path());
    match Responder::open(&settings) {
        Err(err) => {
            assert!(matches!(err, Error::ModelNotTrained(_)));
            assert!(err.is_user_facing());
        }
        Ok(_) => panic!("expected ModelNotTrained"),
    }
}

#[test]
fn failed_retrain_keeps_previous_artifact() {
    let (_tmp, settings) = setup(DATASET);
    train(&settings).unwrap();
    let before = fs::read(&settings.paths.model).unwrap();

    fs::write(&settings.paths.dataset, r#"[{"question": "", "answer": "broken"}]"#).unwrap();
    assert!(matches!(train(&settings).unwrap_err(), Error::InvalidRecord { index: 0, .. }));
    assert_eq!(fs::read(&settings.paths.model).unwrap(), before);

    fs::remove_file(&settings.paths.dataset).unwrap();
    assert!(matches!(train(&settings).unwrap_err(), Error::MissingInput(_)));
    assert_eq!(fs::read(&settings.paths.model).unwrap(), before);
    assert_eq!(Responder::open(&settings).unwrap().respond("how are you").text(), "Doing well, thanks");
}

#[test]
fn question_without_indexable_terms_is_rejected() {
    let (_tmp, settings) = setup(DATASET);
    train(&settings).unwrap();
    let before = fs::read(&settings.paths.model).unwrap();

    fs::write(
        &settings.paths.dataset,
        r#"[{"question": "I ?", "answer": "me"}, {"question": "hello there", "answer": "hi"}]"#,
    )
    .unwrap();
    match train(&settings).unwrap_err() {
        Error::InvalidRecord { index, reason } => {
            assert_eq!(index, 0);
            assert_eq!(reason, "question has no indexable terms");
        }
        other => panic!("expected invalid record, got {:?}", other),
    }
    assert_eq!(fs::read(&settings.paths.model).unwrap(), before);
}

#[test]
fn retraining_unchanged_dataset_is_idempotent() {
    let (_tmp, settings) = setup(DATASET);
    let first = train(&settings).unwrap();
    assert!(!first.unchanged);
    let bytes = fs::read(&settings.paths.model).unwrap();
    let replies: Vec<Reply> = ["what is your name", "who are you", "zzz"].iter().map(|q| Responder::open(&settings).unwrap().respond(q)).collect();

    let second = train(&settings).unwrap();
    assert!(second.unchanged);
    assert_eq!(second.fingerprint, first.fingerprint);
    assert_eq!(second.records, 4);
    assert_eq!(fs::read(&settings.paths.model).unwrap(), bytes);
    let again: Vec<Reply> = ["what is your name", "who are you", "zzz"].iter().map(|q| Responder::open(&settings).unwrap().respond(q)).collect();
    assert_eq!(replies, again);
}

#[test]
fn menu_accepts_numbers_and_names() {
    assert_eq!("1".parse::<MenuChoice>().unwrap(), MenuChoice::Train);
    assert_eq!(" chat \n".parse::<MenuChoice>().unwrap(), MenuChoice::Chat);
    assert!(matches!("3".parse::<MenuChoice>().unwrap_err(), Error::InvalidMenuChoice(s) if s == "3"));

    let mut out = Vec::new();
    let choice = menu::prompt(Cursor::new("2\n"), &mut out).unwrap();
    assert_eq!(choice, MenuChoice::Chat);
    let shown = String::from_utf8(out).unwrap();
    assert!(shown.starts_with("=== Custom NLP Chatbot ==="));
    assert!(shown.contains("1. Train the chatbot"));

    let err = menu::prompt(Cursor::new(""), Vec::new()).unwrap_err();
    assert!(matches!(err, Error::InvalidMenuChoice(_)));
    assert!(err.is_user_facing());
}
