//! End-to-end pipeline: save a corpus, reload it in every format, extract
//! and count patterns, write the export.

use depmine::{Corpus, Item, Token, extract_all, load_corpus, save_corpus, simple_pattern_table, tally, write_export};

/// Annotated corpus with two source-file groups
fn build_corpus() -> Corpus {
    let cat_item = Item {
        source: "2024/animaux.xml".to_string(),
        title: "Chat & souris".to_string(),
        description: "Le chat mange la souris".to_string(),
        category: vec!["Animaux".to_string(), "Nature".to_string()],
        pub_date: "2024-03-01".to_string(),
        analysis: vec![
            Token::new("le", "le", "DET", "chat", "NOUN", "det"),
            Token::new("chat", "chat", "NOUN", "mange", "VERB", "nsubj"),
            Token::new("mange", "manger", "VERB", "mange", "VERB", "root"),
            Token::new("la", "le", "DET", "souris", "NOUN", "det"),
            Token::new("souris", "souris", "NOUN", "mange", "VERB", "obj"),
        ],
    };
    let invite_item = Item {
        source: "2024/societe.xml".to_string(),
        title: "Invitation".to_string(),
        description: "Il est invité à partir".to_string(),
        category: Vec::new(),
        pub_date: "2024-03-02".to_string(),
        analysis: vec![
            Token::new("il", "il", "PRON", "invité", "VERB", "nsubj"),
            Token::new("est", "être", "AUX", "invité", "VERB", "aux"),
            Token::new("invité", "inviter", "VERB", "invité", "VERB", "root"),
            Token::new("à", "à", "ADP", "partir", "VERB", "mark"),
            Token::new("partir", "partir", "VERB", "invité", "VERB", "xcomp"),
        ],
    };
    let raw_item = Item {
        source: "2024/breves.xml".to_string(),
        title: "Brève".to_string(),
        description: "Pas encore annotée".to_string(),
        category: vec!["Divers".to_string()],
        pub_date: "2024-03-03".to_string(),
        analysis: Vec::new(),
    };

    Corpus {
        items: vec![vec![cat_item, invite_item], vec![raw_item]],
    }
}

#[test]
fn file_round_trip_is_format_interchangeable() {
    let corpus = build_corpus();
    let dir = tempfile::tempdir().unwrap();

    let mut reloaded = Vec::new();
    for name in ["corpus.xml", "corpus.json", "corpus.pkl"] {
        let path = dir.path().join(name);
        save_corpus(&corpus, &path).unwrap();
        reloaded.push(load_corpus(&path).unwrap());
    }

    for back in &reloaded {
        assert_eq!(back, &corpus);
    }
}

#[test]
fn unsupported_extension_fails_before_writing() {
    let corpus = build_corpus();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corpus.yaml");

    assert!(save_corpus(&corpus, &path).is_err());
    assert!(!path.exists());
}

#[test]
fn extraction_is_identical_across_formats() {
    let corpus = build_corpus();
    let dir = tempfile::tempdir().unwrap();

    let mut tallies = Vec::new();
    for name in ["corpus.xml", "corpus.json", "corpus.pkl"] {
        let path = dir.path().join(name);
        save_corpus(&corpus, &path).unwrap();
        let back = load_corpus(&path).unwrap();
        tallies.push(tally(&extract_all(&back)));
    }

    assert_eq!(tallies[0], tallies[1]);
    assert_eq!(tallies[1], tallies[2]);

    let counts = &tallies[0];
    // subject + object from the cat sentence, one subordination chain
    assert_eq!(counts.len(), 3);
    assert_eq!(counts[0].0, "ADP, à, mark, VERB, partir, xcomp, VERB, inviter");
    assert_eq!(counts[1].0, "NOUN, chat, nsubj, VERB, manger, , , ");
    assert_eq!(counts[2].0, "NOUN, souris, obj, VERB, manger, , , ");
}

#[test]
fn report_outputs_cover_simple_and_complex_patterns() {
    let corpus = build_corpus();
    let counts = tally(&extract_all(&corpus));

    let table = simple_pattern_table(&counts);
    assert!(table.contains("chat"));
    assert!(table.contains("souris"));
    assert!(!table.contains("partir"));

    let mut buf = Vec::new();
    write_export(&counts, &mut buf).unwrap();
    let export = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = export.lines().collect();

    assert_eq!(lines[0], "dep,gouv,role1,gouverneur_du_gouverneur,role2,compte");
    assert!(lines.contains(&"à,partir,mark,inviter,xcomp,1"));
    assert!(lines.contains(&"chat,manger,nsubj,,,1"));
    assert!(lines.contains(&"souris,manger,obj,,,1"));
}
