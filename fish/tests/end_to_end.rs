use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use helptree_core::SubcommandSchema;
use helptree_discovery::Harvester;
use helptree_discovery::error::Result;
use helptree_fish::quote::quote;
use helptree_fish::{GenerateError, Profile, generate};

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("discovery")
        .join("tests")
        .join("fixtures")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()))
}

const INIT_HELP: &str = "\
Initialize the branchless workflow for this repository

Usage: git-branchless init [OPTIONS]

Options:
      --main-branch <MAIN_BRANCH_NAME>
          Use the provided name as the name of the main branch

      --widget <WIDGET>
          Not a real option

  -h, --help
          Print help
";

const HIDE_HELP: &str = "\
Usage: git-branchless hide [OPTIONS]

Options:
      --widget <WIDGET>
          Not a real option either
";

fn harvest_branchless() -> SubcommandSchema {
    let mut pages = HashMap::new();
    pages.insert("git-branchless".to_string(), fixture("git-branchless-help.txt"));
    pages.insert("git-branchless move".to_string(), fixture("git-branchless-move-help.txt"));
    pages.insert(
        "git-branchless smartlog".to_string(),
        fixture("git-branchless-smartlog-help.txt"),
    );
    pages.insert(
        "git-branchless switch".to_string(),
        fixture("git-branchless-switch-help.txt"),
    );
    pages.insert("git-branchless init".to_string(), INIT_HELP.to_string());
    pages.insert("git-branchless hide".to_string(), HIDE_HELP.to_string());

    let probe = |invocation: &[String]| -> Result<String> {
        let key = invocation.join(" ");
        Ok(pages
            .get(&key)
            .cloned()
            .unwrap_or_else(|| format!("Usage: {key} [OPTIONS]\n")))
    };
    Harvester::new(probe)
        .harvest(&["git-branchless".to_string()])
        .expect("harvest should succeed")
}

fn generate_script(root: &SubcommandSchema, profile: &Profile) -> (String, Vec<String>) {
    let mut out = Vec::new();
    let diagnostics = generate(root, profile, &mut out).expect("generate should succeed");
    (
        String::from_utf8(out).unwrap(),
        diagnostics.warnings().to_vec(),
    )
}

#[test]
fn test_branchless_script() {
    let root = harvest_branchless();
    let (script, warnings) = generate_script(&root, &Profile::git_branchless());

    // Root flags.
    assert!(script.starts_with(
        "complete -c git-branchless -f -s C -d 'Change to the given directory before executing the rest of the program. (The\noption is called `-C` for symmetry with Git.)' -ra \"(__fish_complete_directories)\"\n"
    ));
    assert!(script.contains(
        "complete -c git-branchless -f -l git-executable -d 'The path to the Git executable to use' -xa \"(__fish_complete_path)\"\n"
    ));
    assert!(script.contains("complete -c git-branchless -f -l color -d 'Flag to force enable or disable terminal colors' -r -a "));

    // Subcommand flags resolve through the profile's table.
    assert!(script.contains(
        "complete -c git-branchless__move -f -s s -l source -d 'The source commit to move. This commit, and all of its descendants, will be\nmoved' -kra '(__fish_git_commits; __fish_git_branches)'\n"
    ));
    assert!(script.contains("complete -c git-branchless__move -f -s b -l base -d "));
    assert!(script.contains("-r -ka '(__fish_git_commits)'\n"));
    assert!(script.contains("complete -c git-branchless__smartlog -f -kra '(__fish_git_commits; __fish_git_branches)'\n"));
    assert!(script.contains("complete -c git-branchless__switch -f -kra '(__fish_git_branches; "));

    // The alias is rendered under the tool and under git.
    assert!(script.contains("--fcs-set-argv0=\"git-branchless__sl\""));
    assert!(script.contains("complete -c git-branchless__sl -f -l event-id -d "));
    assert!(script.contains("complete -c git -f --condition __fish_git_needs_command -a "));
    assert!(script.contains("--fcs-set-argv0=\"git__sl\""));
    assert!(script.contains("complete -c git__move -f -s f -l force-rewrite -d "));
    assert!(!script.contains("git__init"));
    assert!(!script.contains("git__switch"));
    assert!(!script.contains("git__help"));

    // `<WIDGET>` appears twice but is reported once.
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("<WIDGET>"));
    let fallback = format!("-a {}", quote(&quote("<WIDGET>")));
    assert!(script.contains(&format!("-l widget -d 'Not a real option' {fallback}\n")));
    assert!(script.contains(&format!("-l widget -d 'Not a real option either' {fallback}\n")));
}

#[test]
fn test_branchless_script_is_deterministic() {
    let root = harvest_branchless();
    let profile = Profile::git_branchless();
    assert_eq!(generate_script(&root, &profile).0, generate_script(&root, &profile).0);
}

#[test]
fn test_build_scenario() {
    let probe = |invocation: &[String]| -> Result<String> {
        Ok(match invocation.join(" ").as_str() {
            "mycli" => "Usage: mycli <COMMAND>\n\nCommands:\n  build   Build the thing\n".to_string(),
            _ => "Usage: mycli build\n".to_string(),
        })
    };
    let root = Harvester::new(probe).harvest(&["mycli".to_string()]).unwrap();
    let (script, warnings) = generate_script(&root, &Profile::new("mycli"));

    let dispatch = format!(
        "complete -c mycli -f --condition \"not __fish_seen_subcommand_from \"build -a {}",
        quote(&format!("build{}\n", quote("\tBuild the thing")))
    );
    let delegation = "complete -c mycli -f --condition \"__fish_seen_subcommand_from build\" -a '(_myfish_complete_subcommand --fcs-set-argv0=\"mycli__build\")'";
    assert_eq!(script, format!("{dispatch}\n{delegation}\n\n"));
    assert!(warnings.is_empty());
}

#[test]
fn test_missing_alias_target_aborts() {
    let root = SubcommandSchema::new("git-branchless")
        .with_subcommand(SubcommandSchema::new("move"));
    let mut out = Vec::new();
    let err = generate(&root, &Profile::git_branchless(), &mut out).unwrap_err();

    assert!(matches!(err, GenerateError::UnknownAliasTarget { ref target, .. } if target == "smartlog"));
    assert!(out.is_empty());
}
