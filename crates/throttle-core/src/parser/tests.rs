use super::*;
use serial_test::serial;

#[test]
fn test_parse_project_and_config() {
    let kdl = r#"
        project "throttle-head-web"

        config {
            sslCertArn "arn:aws:acm:us-east-1:123456789012:certificate/abc"
            cnames "throttlehead.dev" "www.throttlehead.dev"
        }
    "#;

    let settings = parse_stack_string(kdl, "prod").unwrap();
    assert_eq!(settings.project.as_deref(), Some("throttle-head-web"));
    assert_eq!(
        settings.ssl_cert_arn.as_deref(),
        Some("arn:aws:acm:us-east-1:123456789012:certificate/abc")
    );
    assert_eq!(
        settings.cnames,
        Some(vec![
            "throttlehead.dev".to_string(),
            "www.throttlehead.dev".to_string()
        ])
    );
    assert!(settings.parent_zone_id.is_none());
    assert!(!settings.includes_database());
}

#[test]
fn test_cnames_keep_order_and_duplicates() {
    // 重複排除も検証もしない
    let kdl = r#"
        config {
            cnames "b.example.com" "a.example.com" "b.example.com" "not a hostname"
        }
    "#;

    let settings = parse_stack_string(kdl, "dev").unwrap();
    assert_eq!(
        settings.cnames.unwrap(),
        vec![
            "b.example.com",
            "a.example.com",
            "b.example.com",
            "not a hostname"
        ]
    );
}

#[test]
fn test_empty_cnames_is_present() {
    let kdl = r#"
        config {
            cnames
        }
    "#;

    let settings = parse_stack_string(kdl, "dev").unwrap();
    assert_eq!(settings.cnames, Some(Vec::new()));
}

#[test]
fn test_stack_block_applies_only_to_matching_stack() {
    let kdl = r#"
        config {
            sslCertArn "arn:shared"
            cnames "throttlehead.dev"
        }

        stack "staging" {
            cnames "staging.throttlehead.dev"
            parentZoneId "ZSTAGING"
        }

        stack "dev" {
            parentZoneId "ZDEV"
        }
    "#;

    let staging = parse_stack_string(kdl, "staging").unwrap();
    assert_eq!(staging.ssl_cert_arn.as_deref(), Some("arn:shared"));
    assert_eq!(
        staging.cnames,
        Some(vec!["staging.throttlehead.dev".to_string()])
    );
    assert_eq!(staging.parent_zone_id.unwrap().expose(), "ZSTAGING");

    let prod = parse_stack_string(kdl, "prod").unwrap();
    assert_eq!(prod.cnames, Some(vec!["throttlehead.dev".to_string()]));
    assert!(prod.parent_zone_id.is_none());
}

#[test]
fn test_stack_block_wins_regardless_of_position() {
    let kdl = r#"
        stack "dev" {
            sslCertArn "arn:dev"
        }

        config {
            sslCertArn "arn:shared"
        }
    "#;

    let settings = parse_stack_string(kdl, "dev").unwrap();
    assert_eq!(settings.ssl_cert_arn.as_deref(), Some("arn:dev"));
}

#[test]
fn test_stack_block_requires_name() {
    let kdl = r#"
        stack {
            sslCertArn "arn:dev"
        }
    "#;

    let result = parse_stack_string(kdl, "dev");
    assert!(matches!(result, Err(StackError::InvalidConfig(_))));
}

#[test]
fn test_primary_zone_id_alias() {
    let kdl = r#"
        config {
            primaryZoneId "ZLEGACY"
        }
    "#;

    let settings = parse_stack_string(kdl, "dev").unwrap();
    assert_eq!(settings.parent_zone_id.unwrap().expose(), "ZLEGACY");
}

#[test]
fn test_kebab_case_keys() {
    let kdl = r#"
        config {
            ssl-cert-arn "arn:kebab"
            parent-zone-id "ZKEBAB"
            rds-password "s3cret"
            index-asset "assets/custom.html"
        }
    "#;

    let settings = parse_stack_string(kdl, "dev").unwrap();
    assert_eq!(settings.ssl_cert_arn.as_deref(), Some("arn:kebab"));
    assert_eq!(settings.parent_zone_id.unwrap().expose(), "ZKEBAB");
    assert_eq!(settings.rds_password.unwrap().expose(), "s3cret");
    assert_eq!(settings.index_asset.as_deref(), Some("assets/custom.html"));
}

#[test]
fn test_database_flag() {
    let enabled = parse_stack_string("config { database #true }", "dev").unwrap();
    assert_eq!(enabled.database, Some(true));

    let disabled = parse_stack_string("config { database #false }", "dev").unwrap();
    assert_eq!(disabled.database, Some(false));

    let bare = parse_stack_string("config { database }", "dev").unwrap();
    assert_eq!(bare.database, Some(true));

    let absent = parse_stack_string("config { cnames }", "dev").unwrap();
    assert_eq!(absent.database, None);

    for kdl in [r#"config { database "false" }"#, "config { database 0 }"] {
        let result = parse_stack_string(kdl, "dev");
        assert!(
            matches!(result, Err(StackError::InvalidConfig(ref msg)) if msg == "database must be a boolean"),
            "{kdl} should be rejected"
        );
    }
}

#[test]
fn test_non_string_value_is_invalid() {
    let result = parse_stack_string("config { sslCertArn 42 }", "dev");
    assert!(matches!(result, Err(StackError::InvalidConfig(_))));

    let result = parse_stack_string(r#"config { cnames "a.example.com" 7 }"#, "dev");
    assert!(matches!(result, Err(StackError::InvalidConfig(_))));
}

#[test]
fn test_unknown_keys_are_ignored() {
    let kdl = r#"
        config {
            region "us-east-1"
            sslCertArn "arn:x"
        }
        outputs {
            something "else"
        }
    "#;

    let settings = parse_stack_string(kdl, "dev").unwrap();
    assert_eq!(settings.ssl_cert_arn.as_deref(), Some("arn:x"));
}

#[test]
fn test_invalid_kdl() {
    let result = parse_stack_string("config { sslCertArn \"unterminated }", "dev");
    assert!(matches!(result, Err(StackError::KdlParse(_))));
}

#[test]
#[serial]
fn test_secret_from_env() {
    let kdl = r#"
        config {
            parentZoneId env="TEST_THROTTLE_PARENT_ZONE"
            rdsPassword env="TEST_THROTTLE_RDS_PASSWORD"
        }
    "#;

    temp_env::with_vars(
        [
            ("TEST_THROTTLE_PARENT_ZONE", Some("ZFROMENV")),
            ("TEST_THROTTLE_RDS_PASSWORD", None),
        ],
        || {
            let settings = parse_stack_string(kdl, "dev").unwrap();
            assert_eq!(settings.parent_zone_id.unwrap().expose(), "ZFROMENV");
            // 未設定の環境変数はキー未指定と同じ
            assert!(settings.rds_password.is_none());
        },
    );
}

#[test]
fn test_parse_stack_file_missing() {
    let temp_dir = tempfile::tempdir().unwrap();
    let result = parse_stack_file(temp_dir.path().join("stack.kdl"), "dev");
    assert!(matches!(result, Err(StackError::IoError { .. })));
}
