use clap::Parser;
use scheduler::Policy;

use crate::input::{parse_descriptor, parse_workload};
use crate::{run, Cli};

fn cli(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("runner").chain(args.iter().copied())).unwrap()
}

fn output(args: &[&str], text: &str) -> String {
    let mut out: Vec<u8> = Vec::new();
    run(&cli(args), text, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn parses_selector_and_records() {
    let workload = parse_workload("4\n1/0/5/3/2\n\n 2 / 2 / 3 / 1 / 2 \n", true).unwrap();

    assert_eq!(workload.policy, Some(Policy::RoundRobin));
    assert_eq!(workload.descriptors.len(), 2);
    assert_eq!(workload.descriptors[1].burst(), 3);
    assert_eq!(workload.descriptors[1].priority(), 1);
}

#[test]
fn parses_records_without_selector() {
    let workload = parse_workload("1/0/5/3/2\n", false).unwrap();

    assert_eq!(workload.policy, None);
    assert_eq!(workload.descriptors.len(), 1);
}

#[test]
fn reports_bad_records_with_line_numbers() {
    let err = parse_workload("1\n1/0/5/3/2\n2/x/3/1/2\n", true).unwrap_err();
    assert!(err.to_string().contains("line 3"), "{err}");

    let err = parse_descriptor("1/0/5", 7).unwrap_err();
    assert!(err.to_string().contains("line 7"), "{err}");

    let err = parse_workload("9\n1/0/5/3/2\n", true).unwrap_err();
    assert!(err.to_string().contains("line 1"), "{err}");
}

#[test]
fn rejects_invalid_descriptor_values() {
    let err = parse_descriptor("1/0/0/3/2", 2).unwrap_err();
    assert!(format!("{err:#}").contains("burst time must be positive"), "{err:#}");
}

#[test]
fn prints_fcfs_trace() {
    assert_eq!(output(&[], "1\n1/0/5/0/1\n2/2/3/0/1\n"), "1/1/0/5/0\n2/2/5/8/0\n");
}

#[test]
fn policy_flag_overrides_selector() {
    assert_eq!(
        output(&["--policy", "rr"], "1\n1/0/5/0/2\n"),
        "1/1/0/2/0\n2/1/2/4/0\n3/1/4/5/0\n"
    );
}

#[test]
fn dpsa_flags_change_the_trace() {
    let text = "5\n1/0/4/5/2\n2/0/2/5/2\n";

    assert_eq!(output(&[], text), "1/1/0/2/8\n2/2/2/4/7\n3/1/4/6/10\n");
    assert_eq!(
        output(&["--dpsa-penalty", "1", "--dpsa-aging", "2"], text),
        "1/1/0/2/6\n2/2/2/4/4\n3/1/4/6/5\n"
    );
}

#[test]
fn negative_dpsa_steps_are_rejected() {
    assert!(Cli::try_parse_from(["runner", "--dpsa-aging=-1"]).is_err());
    assert!(Cli::try_parse_from(["runner", "--dpsa-penalty=-3"]).is_err());
    assert_eq!(cli(&["--dpsa-aging", "0"]).dpsa_aging, 0);
}

#[test]
fn saturated_priorities_keep_running() {
    let text = "5\n1/0/4/2147483647/2\n2/0/4/2147483647/2\n";

    assert_eq!(
        output(&[], text),
        "1/1/0/2/2147483647\n2/2/2/4/2147483647\n3/1/4/6/2147483647\n4/2/6/8/2147483647\n"
    );
}

#[test]
fn rejects_times_beyond_clock_range() {
    let err = parse_descriptor("1/0/9223372036854775807/0/1", 4).unwrap_err();
    assert!(format!("{err:#}").contains("burst time must not exceed"), "{err:#}");
}

#[test]
fn runs_every_policy_with_headers() {
    let text = output(&["--all", "--no-selector"], "1/0/3/0/1\n");

    for policy in Policy::ALL {
        assert!(text.contains(&format!("# {policy}\n")), "{text}");
    }
}

#[test]
fn appends_statistics() {
    let text = output(&["--stats"], "1\n1/0/5/0/1\n2/2/3/0/1\n");
    assert!(text.contains("avg turnaround 5.50, avg waiting 1.50"), "{text}");
}

#[test]
fn missing_policy_is_an_error() {
    let mut out: Vec<u8> = Vec::new();
    assert!(run(&cli(&["--no-selector"]), "1/0/3/0/1\n", &mut out).is_err());
    assert!(out.is_empty());
}

#[test]
fn duplicate_pid_aborts_before_output() {
    let mut out: Vec<u8> = Vec::new();
    let err = run(&cli(&[]), "1\n1/0/3/0/1\n1/2/3/0/1\n", &mut out).unwrap_err();

    assert!(format!("{err:#}").contains("duplicate process id 1"), "{err:#}");
    assert!(out.is_empty());
}
