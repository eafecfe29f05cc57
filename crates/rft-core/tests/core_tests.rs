use rft_core::{InfoExtractor, RewriteEngine, ScnVisitor, process_scn_str, rewrite_str};

fn lines(text: &str) -> Vec<&str> {
    text.lines().collect()
}

#[derive(Default)]
struct Recorder {
    events: Vec<String>,
}

impl ScnVisitor for Recorder {
    fn on_key_value(&mut self, key: &str, value: &str, comment: Option<&str>, orig: &str) {
        self.events
            .push(format!("kv[{key}|{value}|{comment:?}|{orig}]"));
    }
    fn on_section_start(&mut self, comment: Option<&str>, _orig: &str) {
        self.events.push(format!("start[{comment:?}]"));
    }
    fn on_section_end(&mut self, comment: Option<&str>, _orig: &str) {
        self.events.push(format!("end[{comment:?}]"));
    }
    fn on_unknown(&mut self, orig: &str) {
        self.events.push(format!("unknown[{orig}]"));
    }
}

#[test]
fn dispatcher_visits_every_line_in_order() {
    let mut rec = Recorder::default();
    let n = process_scn_str("A = 1 // c\r\n{\n  ;junk\n} // done\n", &mut rec);
    assert_eq!(n, 4);
    assert_eq!(
        rec.events,
        vec![
            "kv[A|1|Some(\"// c\")|A = 1 // c]",
            "start[None]",
            "unknown[  ;junk]",
            "end[Some(\"// done\")]",
        ]
    );
}

#[test]
fn extract_search_path_and_mas_file() {
    let info = rft_core::extract_info_str("SearchPath=..\\vehicles\n MASFile=test.mas\n");
    assert_eq!(info.search_paths, vec!["../vehicles"]);
    assert_eq!(info.mas_files, vec!["test.mas"]);
    assert!(!info.has_skyboxi);
}

#[test]
fn extract_ignores_nested_directives_and_strips_root() {
    let text = "\
MASFile=\\root.mas
masfile=<VEHDIR>F1\\car.mas
MASFile=<VEHDIR>F1\\car.mas
Instance=skyboxI
{
  MASFile=sky.mas
  SearchPath=nested
}
SEARCHPATH=<teamdir>\\..\\
";
    let mut ex = InfoExtractor::new();
    process_scn_str(text, &mut ex);
    assert_eq!(ex.depth(), 0);
    let info = ex.into_info();
    assert_eq!(
        info.mas_files,
        vec!["root.mas", "<VEHDIR>/F1/car.mas", "<VEHDIR>/F1/car.mas"]
    );
    assert_eq!(info.search_paths, vec!["<teamdir>/.."]);
    assert!(info.has_skyboxi);
    assert_eq!(info.to_json()["has_skyboxi"], serde_json::json!(true));
}

#[test]
fn rewrite_without_replacements_is_identity() {
    let text = "\
// header
SearchPath=.
MASFile=a.mas  // body
Instance=track
{
  MeshFile=x.gmt
  {
    Deep=1
  }
}
   trailing junk
";
    let out = rewrite_str(text, None, None);
    assert_eq!(lines(&out), lines(text));
}

#[test]
fn rewrite_replaces_single_search_path_in_place() {
    let text = "Header=1\nSearchPath=old\nMASFile=a.mas\n";
    let out = rewrite_str(
        text,
        Some(vec!["<VEHDIR>/F1".into(), "<TEAMDIR>/..".into(), "x/y".into()]),
        None,
    );
    assert_eq!(
        lines(&out),
        vec![
            "Header=1",
            "SearchPath=<VEHDIR>\\F1",
            "SearchPath=<TEAMDIR>\\..",
            "SearchPath=x\\y",
            "MASFile=a.mas",
        ]
    );
}

#[test]
fn rewrite_drops_later_occurrences_after_injection() {
    let text = "SearchPath=a\nX=1\nSearchPath=b\nsearchpath=c\n{\nSearchPath=nested\n}\n";
    let out = rewrite_str(text, Some(vec!["new".into()]), None);
    assert_eq!(
        lines(&out),
        vec!["SearchPath=new", "X=1", "{", "SearchPath=nested", "}"]
    );
}

#[test]
fn rewrite_mas_and_search_path_independently() {
    let text = "MASFile=a.mas\nSearchPath=p\nMASFile=b.mas\nSearchPath=q\n";
    let out = rewrite_str(text, None, Some(vec!["c.mas".into(), "d/e.mas".into()]));
    assert_eq!(
        lines(&out),
        vec!["MASFile=c.mas", "MASFile=d\\e.mas", "SearchPath=p", "SearchPath=q"]
    );
}

#[test]
fn rewrite_deletes_skybox_block() {
    let out = rewrite_str("Instance=SkyboxI\n{\nFoo=Bar\n}\nNext=1\n", None, None);
    assert_eq!(lines(&out), vec!["Next=1"]);
}

#[test]
fn skybox_window_tracks_nesting_and_keeps_unknown_lines() {
    let text = "\
Instance=skyboxi
{
  MeshFile=sky.gmt
  {
    Inner=1
  }
  stray text
}
Instance=Track
{
  MeshFile=track.gmt
}
";
    let mut engine = RewriteEngine::new(None, None);
    process_scn_str(text, &mut engine);
    assert_eq!(engine.state().depth(), 0);
    assert!(!engine.state().is_deleting());
    assert_eq!(
        engine.lines(),
        &["  stray text", "Instance=Track", "{", "  MeshFile=track.gmt", "}"]
    );
}

#[test]
fn rewrite_file_roundtrip_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("car.gen");
    std::fs::write(&p, b"SearchPath=old\r\nName=M\xfcller\r\nMASFile=a.mas\r\n").unwrap();

    let info = rft_core::extract_info(&p).unwrap();
    assert_eq!(info.search_paths, vec!["old"]);

    rft_core::modify_scn_file(&p, Some(vec!["<VEHDIR>/F1".into()]), None).unwrap();
    let bytes = std::fs::read(&p).unwrap();
    assert_eq!(
        bytes,
        b"SearchPath=<VEHDIR>\\F1\r\nName=M\xfcller\r\nMASFile=a.mas\r\n".to_vec()
    );
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = rft_core::extract_info(&dir.path().join("nope.gen")).unwrap_err();
    assert!(matches!(err, rft_core::ScnError::Io { .. }));
}

#[test]
fn scan_and_check_references() {
    use std::fs;
    let d = tempfile::tempdir().unwrap();
    let root = d.path();
    fs::create_dir_all(root.join("F1/Team")).unwrap();
    fs::write(root.join("F1/car.mas"), b"").unwrap();
    fs::write(root.join("F1/Team/team.GEN"), b"").unwrap();
    fs::write(root.join("F1/Team/a.veh"), b"").unwrap();
    fs::write(root.join("notes.txt"), b"").unwrap();

    let files = rft_core::scan_mod_dir(root).unwrap();
    assert_eq!(files.gen_files, vec![root.join("F1/Team/team.GEN")]);
    assert_eq!(files.veh_files.len(), 1);
    assert_eq!(files.mas_files, vec![root.join("F1/car.mas")]);
    assert_eq!(files.scene_files().len(), 1);

    let opts = rft_core::CheckOpts {
        vehdir: root.to_path_buf(),
        teamdir: root.join("F1/Team"),
        ..Default::default()
    };
    let report = rft_core::check_references(
        &["<VEHDIR>F1".into(), "<TEAMDIR>..".into(), "missing".into(), ".".into()],
        &["car.mas".into(), "CMAPS.MAS".into(), "gone.mas".into()],
        &opts,
    );
    assert_eq!(report.warnings, vec!["couldn't locate SearchPath missing"]);
    assert_eq!(report.errors, vec!["couldn't locate gone.mas"]);
    assert!(!report.is_clean());

    let clean = rft_core::check_references(&["<VEHDIR>F1".into()], &["car.mas".into()], &opts);
    assert!(clean.is_clean());
}

#[test]
fn zip_backup_of_scene_files() {
    let d = tempfile::tempdir().unwrap();
    let root = d.path().join("mod");
    std::fs::create_dir_all(root.join("a")).unwrap();
    let f = root.join("a/x.gen");
    std::fs::write(&f, b"MASFile=x.mas\r\n").unwrap();
    let zip = rft_core::zip_backup_files(&root, &[f]).unwrap();
    assert!(zip.exists());
    assert_eq!(zip.parent(), Some(d.path()));
}

#[test]
fn untouched_rewrite_keeps_non_ascii_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let utf8 = dir.path().join("utf8.gen");
    let latin1 = dir.path().join("latin1.gen");
    let utf8_bytes = "\u{feff}Name=Price \u{20ac}5\r\nMASFile=k\u{fc}hl.mas\r\n"
        .as_bytes()
        .to_vec();
    let latin1_bytes = b"Name=\xc3\xbc\r\nDriver=M\xfcller\x85\r\n".to_vec();
    std::fs::write(&utf8, &utf8_bytes).unwrap();
    std::fs::write(&latin1, &latin1_bytes).unwrap();

    rft_core::modify_scn_file(&utf8, None, None).unwrap();
    rft_core::modify_scn_file(&latin1, None, None).unwrap();

    assert_eq!(std::fs::read(&utf8).unwrap(), utf8_bytes);
    // NEL (0x85) is a line break, so it comes back as CRLF
    assert_eq!(
        std::fs::read(&latin1).unwrap(),
        b"Name=\xc3\xbc\r\nDriver=M\xfcller\r\n\r\n".to_vec()
    );
}

#[test]
fn nested_skybox_instance_is_not_a_sentinel() {
    let text = "\
Instance=Track
{
  Instance=SkyboxI
  {
    MASFile=sky.mas
  }
  MeshFile=track.gmt
}
MASFile=top.mas
";
    let mut engine = RewriteEngine::new(None, None);
    process_scn_str(text, &mut engine);
    assert!(!engine.state().is_deleting());
    assert_eq!(engine.finish(), text);

    let info = rft_core::extract_info_str(text);
    assert!(!info.has_skyboxi);
    assert_eq!(info.mas_files, vec!["top.mas"]);
}
