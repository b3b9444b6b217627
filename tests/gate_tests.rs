//! 输出判定属性测试

use proptest::prelude::*;
use ssh_flow_logger::emit::{decide, Decision, SkipReason, Snapshot};
use ssh_flow_logger::ssh::SshBanner;

fn banner() -> impl Strategy<Value = Option<SshBanner>> {
    prop::option::of(
        ("[12]\\.[0-9]{1,2}", "[A-Za-z][A-Za-z0-9_.]{0,15}")
            .prop_map(|(proto, software)| SshBanner::new(proto, software)),
    )
}

fn snapshot() -> impl Strategy<Value = Snapshot> {
    (any::<bool>(), banner(), banner(), any::<bool>()).prop_map(
        |(protocol_matches, client_banner, server_banner, already_logged)| Snapshot {
            protocol_matches,
            client_banner,
            server_banner,
            already_logged,
        },
    )
}

proptest! {
    #[test]
    fn prop_wrong_protocol_is_never_logged(snapshot in snapshot()) {
        if !snapshot.protocol_matches {
            prop_assert_eq!(decide(&snapshot), Decision::NotApplicable);
        }
    }

    #[test]
    fn prop_logged_flow_always_skips(snapshot in snapshot()) {
        if snapshot.protocol_matches && snapshot.already_logged {
            prop_assert_eq!(decide(&snapshot), Decision::Skip(SkipReason::AlreadyLogged));
        }
    }

    #[test]
    fn prop_log_now_only_with_both_banners(snapshot in snapshot()) {
        if let Decision::LogNow(handshake) = decide(&snapshot) {
            prop_assert!(snapshot.protocol_matches);
            prop_assert!(!snapshot.already_logged);
            prop_assert_eq!(Some(handshake.client), snapshot.client_banner.as_ref());
            prop_assert_eq!(Some(handshake.server), snapshot.server_banner.as_ref());
        }
    }

    #[test]
    fn prop_decision_is_deterministic(snapshot in snapshot()) {
        let copy = snapshot.clone();
        prop_assert_eq!(decide(&snapshot), decide(&copy));
    }
}

#[test]
fn test_incomplete_combinations() {
    let present = Some(SshBanner::new("2.0", "OpenSSH_8.1"));
    for (client_banner, server_banner) in [
        (None, None),
        (present.clone(), None),
        (None, present.clone()),
    ] {
        let snapshot = Snapshot {
            protocol_matches: true,
            client_banner,
            server_banner,
            already_logged: false,
        };
        assert_eq!(decide(&snapshot), Decision::Skip(SkipReason::Incomplete));
    }
}
