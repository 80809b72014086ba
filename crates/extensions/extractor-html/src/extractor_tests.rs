use super::*;

const FIXTURE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>  Acme Outdoor | Gear for the long way round </title>
  <meta name="description" content="Durable packs and shelters, built to be repaired.">
  <style>p { color: red; }</style>
  <script>window.track = function () { return "tracking text that is long enough"; };</script>
</head>
<body>
  <nav>
    <ul><li>Shop all categories and collections</li><li>About</li></ul>
    <a class="nav-cta" href="/signup">Join the club</a>
  </nav>
  <header>
    <h1>Gear for the long way round</h1>
    <a class="btn btn-primary" href="/shop">Shop packs</a>
  </header>
  <main>
    <h2>Built to be repaired, not replaced</h2>
    <p>Every pack we make ships with a lifetime repair promise and spare buckles.</p>
    <p>Short one.</p>
    <p hidden>This paragraph is hidden but long enough to count.</p>
    <div style="display:none"><p>Invisible promo copy that should never be read.</p></div>
    <ul>
      <li><p>Recycled ripstop nylon rated for alpine weather.</p></li>
    </ul>
    <p>Every pack we make ships with a lifetime repair promise and spare buckles.</p>
    <button type="button">Find your fit</button>
    <input type="submit" value="Subscribe">
    <a role="button" href="/stores">Visit a store</a>
    <a href="/blog">Read the journal</a>
  </main>
  <footer><p>Copyright Acme Outdoor Company, all rights reserved.</p></footer>
</body>
</html>"#;

#[test]
fn test_extract_main_text_fixture() {
    let extractor = ContentExtractor::default();
    let text = extractor.extract_main_text(FIXTURE);
    assert_eq!(
        text,
        "Gear for the long way round\n\
         Built to be repaired, not replaced\n\
         Every pack we make ships with a lifetime repair promise and spare buckles.\n\
         Recycled ripstop nylon rated for alpine weather."
    );
}

#[test]
fn test_extract_main_text_is_deterministic() {
    let extractor = ContentExtractor::default();
    let first = extractor.extract_main_text(FIXTURE);
    for _ in 0..3 {
        assert_eq!(extractor.extract_main_text(FIXTURE), first);
    }
}

#[test]
fn test_extract_full_content() {
    let extractor = ContentExtractor::default();
    let content = extractor.extract(FIXTURE, Some("https://acme.example/"));

    assert_eq!(content.url.as_deref(), Some("https://acme.example/"));
    assert_eq!(content.title, "Acme Outdoor | Gear for the long way round");
    assert_eq!(
        content.description,
        "Durable packs and shelters, built to be repaired."
    );
    assert_eq!(
        content.headlines,
        vec!["Gear for the long way round", "Built to be repaired, not replaced"]
    );
    let texts: Vec<&str> = content.elements.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(
        texts,
        vec!["Join the club", "Shop packs", "Find your fit", "Subscribe", "Visit a store"]
    );
    assert_eq!(content.elements[3].tag, "input");
}

#[test]
fn test_budget_truncates_and_stops() {
    let extractor = ContentExtractor::new(ExtractionOptions {
        max_chars: 40,
        ..Default::default()
    });
    let text = extractor.extract_main_text(FIXTURE);
    assert_eq!(text.chars().count(), 40);
    assert_eq!(text, "Gear for the long way round\nBuilt to be ");
}

#[test]
fn test_min_length_threshold() {
    let extractor = ContentExtractor::new(ExtractionOptions {
        min_text_length: 5,
        ..Default::default()
    });
    let text = extractor.extract_main_text(FIXTURE);
    assert!(text.contains("Short one."));
}

#[test]
fn test_empty_and_garbage_input() {
    let extractor = ContentExtractor::default();
    assert_eq!(extractor.extract_main_text(""), "");
    assert_eq!(extractor.extract_main_text("<<<>>> not really html"), "");
    let content = extractor.extract("", None);
    assert!(content.is_empty());
    assert!(content.title.is_empty());
}

#[test]
fn test_title_falls_back_to_headline() {
    let extractor = ContentExtractor::default();
    let content = extractor.extract("<body><h1>Hello there</h1></body>", None);
    assert_eq!(content.title, "Hello there");
}

#[test]
fn test_og_description_fallback() {
    let extractor = ContentExtractor::default();
    let content = extractor.extract(
        r#"<head><meta property="og:description" content=" Social copy "></head>"#,
        None,
    );
    assert_eq!(content.description, "Social copy");
}

#[test]
fn test_limits_on_headlines_and_elements() {
    let html: String = (0..30)
        .map(|i| format!("<h2>Heading number {i}</h2><button>Action {i}</button>"))
        .collect();
    let extractor = ContentExtractor::new(ExtractionOptions {
        max_headlines: 3,
        max_elements: 4,
        ..Default::default()
    });
    let content = extractor.extract(&html, None);
    assert_eq!(content.headlines.len(), 3);
    assert_eq!(content.elements.len(), 4);
    assert_eq!(content.headlines[0], "Heading number 0");
}

#[test]
fn test_options_serde_defaults() {
    let opts = ExtractionOptions::default();
    let json = serde_json::to_value(&opts).unwrap();
    assert_eq!(json["max_chars"], 5000);
    assert_eq!(ContentExtractor::default().options(), &opts);
}
