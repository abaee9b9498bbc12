use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{days_from_today, init_db, json, setup_test_db, tor};

#[test]
fn test_commands_require_init() {
    let db_path = setup_test_db("no_init");

    tor()
        .args(["--db", &db_path, "list"])
        .assert()
        .failure()
        .stderr(contains("torego init"));
}

#[test]
fn test_remind_and_list() {
    let db_path = init_db("remind_list");

    tor()
        .args(["--db", &db_path, "remind", "water the plants"])
        .assert()
        .success()
        .stdout(contains("Reminder #1 set"));

    tor()
        .args(["--db", &db_path, "remind", "pay rent", "monthly"])
        .assert()
        .success();

    tor()
        .args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("water the plants"))
        .stdout(contains("daily"))
        .stdout(contains("pay rent"))
        .stdout(contains("monthly"));
}

#[test]
fn test_remind_rejects_empty_title_and_bad_period() {
    let db_path = init_db("remind_invalid");

    tor()
        .args(["--db", &db_path, "remind", "  "])
        .assert()
        .failure()
        .stderr(contains("title must not be empty"));

    tor()
        .args(["--db", &db_path, "remind", "gym", "fortnightly"])
        .assert()
        .failure()
        .stderr(contains("Invalid period"));

    tor()
        .args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("No reminders found"));
}

#[test]
fn test_checkout_show_dismiss_round_trip() {
    let db_path = init_db("round_trip");

    tor()
        .args(["--db", &db_path, "remind", "take pills"])
        .assert()
        .success();

    tor()
        .args(["--db", &db_path, "checkout"])
        .assert()
        .success()
        .stdout(contains("1 new notification"));

    // no subcommand → show
    tor()
        .args(["--db", &db_path])
        .assert()
        .success()
        .stdout(contains("0: take pills"));

    tor()
        .args(["--db", &db_path, "dismiss", "0"])
        .assert()
        .success()
        .stdout(contains("Dismissed 1 notification(s): take pills"));

    tor()
        .args(["--db", &db_path, "show"])
        .assert()
        .success()
        .stdout(contains("No active notifications"));
}

#[test]
fn test_second_checkout_same_day_fires_nothing() {
    let db_path = init_db("checkout_twice");

    tor()
        .args(["--db", &db_path, "remind", "stretch"])
        .assert()
        .success();

    tor().args(["--db", &db_path, "checkout"]).assert().success();
    tor()
        .args(["--db", &db_path, "checkout"])
        .assert()
        .success()
        .stdout(contains("Nothing is due"));

    let groups = json(&db_path, &["show"]);
    assert_eq!(groups.as_array().unwrap().len(), 1);
    assert_eq!(groups[0]["group_count"], 1);
    assert_eq!(groups[0]["group_id"], "r1");
}

#[test]
fn test_checkout_json_reports_what_fired() {
    let db_path = init_db("checkout_json");
    let yesterday = days_from_today(-1);

    tor()
        .args(["--db", &db_path, "remind", "renew passport", "--once", "--on", &yesterday])
        .assert()
        .success();
    tor()
        .args(["--db", &db_path, "remind", "stretch"])
        .assert()
        .success();

    let report = json(&db_path, &["checkout"]);
    assert_eq!(report["notified"], 2);
    assert_eq!(report["finished"], 1);
    assert_eq!(report["rescheduled"], 1);
    assert!(report["stalled"].as_array().unwrap().is_empty());

    let again = json(&db_path, &["checkout"]);
    assert_eq!(again["notified"], 0);
}

#[test]
fn test_one_shot_finishes_after_firing() {
    let db_path = init_db("one_shot");
    let yesterday = days_from_today(-1);

    tor()
        .args(["--db", &db_path, "remind", "renew passport", "--once", "--on", &yesterday])
        .assert()
        .success()
        .stdout(contains("once"));

    tor().args(["--db", &db_path, "checkout"]).assert().success();
    tor().args(["--db", &db_path, "checkout"]).assert().success();

    let reminders = json(&db_path, &["list"]);
    assert!(reminders.as_array().unwrap().is_empty());

    let groups = json(&db_path, &["show"]);
    assert_eq!(groups[0]["group_count"], 1);
    assert_eq!(groups[0]["title"], "renew passport");
}

#[test]
fn test_backlogged_weekly_catches_up_one_week_per_checkout() {
    let db_path = init_db("weekly_backlog");
    let ten_days_ago = days_from_today(-10);

    tor()
        .args(["--db", &db_path, "remind", "review budget", "weekly", "--on", &ten_days_ago])
        .assert()
        .success();

    tor().args(["--db", &db_path, "checkout"]).assert().success();
    let reminders = json(&db_path, &["list"]);
    assert_eq!(reminders[0]["scheduled_at"], days_from_today(-3));

    tor().args(["--db", &db_path, "checkout"]).assert().success();
    let reminders = json(&db_path, &["list"]);
    assert_eq!(reminders[0]["scheduled_at"], days_from_today(4));
    assert_eq!(reminders[0]["period"], "weekly");

    let groups = json(&db_path, &["show"]);
    assert_eq!(groups[0]["group_count"], 2);
}

#[test]
fn test_dismiss_out_of_range_fails() {
    let db_path = init_db("dismiss_range");

    tor()
        .args(["--db", &db_path, "notify", "call the bank"])
        .assert()
        .success();

    tor()
        .args(["--db", &db_path, "dismiss", "1"])
        .assert()
        .failure()
        .stderr(contains("1 is not a valid index"));

    tor()
        .args(["--db", &db_path, "dismiss", "0"])
        .assert()
        .success();
}

#[test]
fn test_ad_hoc_notifications_are_listed_separately() {
    let db_path = init_db("ad_hoc");

    for _ in 0..2 {
        tor()
            .args(["--db", &db_path, "notify", "stand up"])
            .assert()
            .success();
    }

    tor()
        .args(["--db", &db_path, "show"])
        .assert()
        .success()
        .stdout(contains("0: stand up"))
        .stdout(contains("1: stand up"));

    tor()
        .args(["--db", &db_path, "dismiss", "--group", "n2"])
        .assert()
        .success()
        .stdout(contains("group n2"));

    let groups = json(&db_path, &["show"]);
    assert_eq!(groups.as_array().unwrap().len(), 1);
    assert_eq!(groups[0]["group_id"], "n1");

    tor()
        .args(["--db", &db_path, "dismiss", "--group", "n2"])
        .assert()
        .failure()
        .stderr(contains("no active notifications in group n2"));
}

#[test]
fn test_forget_by_id_and_index() {
    let db_path = init_db("forget");

    tor().args(["--db", &db_path, "remind", "a"]).assert().success();
    tor().args(["--db", &db_path, "remind", "b"]).assert().success();

    tor()
        .args(["--db", &db_path, "forget", "1"])
        .assert()
        .success()
        .stdout(contains("Reminder forgotten"));

    // unknown ids are not an error
    tor()
        .args(["--db", &db_path, "forget", "99"])
        .assert()
        .success()
        .stdout(contains("No reminder with id 99"));

    tor()
        .args(["--db", &db_path, "forget", "--index", "1"])
        .assert()
        .failure()
        .stderr(contains("not a valid index"));

    tor()
        .args(["--db", &db_path, "forget", "--index", "0"])
        .assert()
        .success()
        .stdout(contains("#2 forgotten: b"));

    tor()
        .args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("No reminders found"));
}

#[test]
fn test_edit_reminder() {
    let db_path = init_db("edit");
    let next_week = days_from_today(7);

    tor().args(["--db", &db_path, "remind", "gym"]).assert().success();

    tor()
        .args([
            "--db", &db_path, "edit", "1", "--title", "gym (legs)", "--period", "2d", "--on",
            &next_week,
        ])
        .assert()
        .success();

    let reminders = json(&db_path, &["list"]);
    assert_eq!(reminders[0]["title"], "gym (legs)");
    assert_eq!(reminders[0]["period"], "2d");
    assert_eq!(reminders[0]["scheduled_at"], next_week);

    tor()
        .args(["--db", &db_path, "edit", "42", "--once"])
        .assert()
        .failure()
        .stderr(contains("Not found"));

    tor()
        .args(["--db", &db_path, "edit", "1"])
        .assert()
        .failure()
        .stderr(contains("nothing to change"));
}

#[test]
fn test_internal_log_records_operations() {
    let db_path = init_db("log");

    tor().args(["--db", &db_path, "remind", "x"]).assert().success();
    tor().args(["--db", &db_path, "checkout"]).assert().success();

    tor()
        .args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("init").and(contains("remind")).and(contains("checkout")));
}

#[test]
fn test_db_info_and_check() {
    let db_path = init_db("db_info");

    tor().args(["--db", &db_path, "notify", "x"]).assert().success();

    tor()
        .args(["--db", &db_path, "db", "--info", "--check"])
        .assert()
        .success()
        .stdout(contains("Notifications:"))
        .stdout(contains("Integrity check passed"));
}
