//! Concurrent access tests
//!
//! One registry shared across threads: readers in parallel, writers serialized,
//! and no lost updates when writers race on the same role.

use std::sync::Arc;
use std::thread;

use rolemask::{Permission, Role, Roles, ALL_PERMISSIONS, PERMISSION_BITS};

const P0: Permission = Permission::new(1);
const P1: Permission = Permission::new(2);
const P2: Permission = Permission::new(3);
const P3: Permission = Permission::new(4);
const P4: Permission = Permission::new(5);
const P5: Permission = Permission::new(6);
const P6: Permission = Permission::new(7);
const P7: Permission = Permission::new(8);

const ROLE1: Role = Role::from_static("Role1");
const ROLE2: Role = Role::from_static("Role2");

#[test]
fn roles_is_send_sync() {
    fn assert_traits<T: Send + Sync>() {}
    assert_traits::<Roles>();
}

// ============================================================================
// Readers
// ============================================================================

/// Parallel readers all see the last completed write
#[test]
fn has_permission_from_many_threads() {
    let roles = Arc::new(Roles::new());
    roles.assign_permissions(ROLE1, [P0, P2, P4, P6]);
    roles.assign_permissions(ROLE2, [P0, P1, P3, P5, P7]);

    let checks: Vec<(Role, Vec<Permission>, bool)> = vec![
        (ROLE1, vec![P0, P2, P4, P6], true),
        (ROLE2, vec![P0, P1, P3, P5, P7], true),
        (ROLE2, vec![P2, P4, P6], false),
        (ROLE1, vec![P1, P3, P5, P7], false),
    ];

    let handles: Vec<_> = checks
        .into_iter()
        .map(|(role, perms, expected)| {
            let roles = Arc::clone(&roles);
            thread::spawn(move || {
                for _ in 0..1000 {
                    for &p in &perms {
                        assert_eq!(roles.has_permission(&role, p), expected, "{} {}", role, p);
                    }
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }
}

// ============================================================================
// Writers
// ============================================================================

/// Every thread sets a different bit on the same role; none may be lost
#[test]
fn concurrent_assign_same_role_loses_nothing() {
    let roles = Roles::new();
    thread::scope(|s| {
        for b in 0..PERMISSION_BITS {
            let roles = &roles;
            s.spawn(move || {
                for _ in 0..100 {
                    roles.assign_permissions("shared", [Permission::new(b)]);
                }
            });
        }
    });
    assert_eq!(roles.get_role_value("shared"), ALL_PERMISSIONS);
}

/// Every thread clears a different bit on the same role; all must end up cleared
#[test]
fn concurrent_withdraw_same_role_loses_nothing() {
    let roles = Roles::new();
    roles.assign_permissions("shared", (0..PERMISSION_BITS).map(Permission::new));
    thread::scope(|s| {
        for b in 0..PERMISSION_BITS {
            let roles = &roles;
            s.spawn(move || roles.withdraw_permissions("shared", [Permission::new(b)]));
        }
    });
    assert_eq!(roles.get_role_value("shared"), 0);
}

/// Assign and withdraw racing on disjoint bits of one role
#[test]
fn concurrent_assign_and_withdraw_disjoint_bits() {
    let roles = Roles::new();
    roles.assign_permissions("mixed", [P0, P1, P2, P3]);
    thread::scope(|s| {
        s.spawn(|| {
            for _ in 0..500 {
                roles.withdraw_permissions("mixed", [P0, P1]);
            }
        });
        s.spawn(|| {
            for _ in 0..500 {
                roles.assign_permissions("mixed", [P4, P5]);
            }
        });
    });
    assert_eq!(roles.permissions("mixed"), vec![P2, P3, P4, P5]);
}

/// Writers on different roles never touch each other's bitsets
#[test]
fn concurrent_writers_on_different_roles() {
    let roles = Roles::new();
    let names: Vec<String> = (0..16).map(|i| format!("role-{}", i)).collect();
    thread::scope(|s| {
        for (i, name) in names.iter().enumerate() {
            let roles = &roles;
            s.spawn(move || {
                let own = Permission::new(i as u32);
                let extra = Permission::new(i as u32 + 32);
                for _ in 0..200 {
                    roles.assign_permissions(name.clone(), [own, extra]);
                    roles.withdraw_permissions(name, [extra]);
                }
            });
        }
    });
    for (i, name) in names.iter().enumerate() {
        assert_eq!(roles.get_role_value(name), 1u64 << i);
    }
    assert_eq!(roles.len(), names.len());
}

/// Under assign-only writes a reader never sees a bit disappear
#[test]
fn reader_sees_monotonic_growth() {
    let roles = Roles::new();
    roles.assign_permissions("grow", [] as [Permission; 0]);
    thread::scope(|s| {
        s.spawn(|| {
            for b in 0..PERMISSION_BITS {
                roles.assign_permissions("grow", [Permission::new(b)]);
            }
        });
        s.spawn(|| {
            let mut last = 0u64;
            for _ in 0..10_000 {
                let v = roles.get_role_value("grow");
                assert_eq!(v & last, last, "bits lost: {:#x} -> {:#x}", last, v);
                last = v;
            }
        });
    });
    assert_eq!(roles.get_role_value("grow"), ALL_PERMISSIONS);
}
