#![cfg(unix)]

use std::io;
use std::process::Child;
use std::ptr::addr_of_mut;
use std::time::Duration;

use anyhow::Context;
use anyhow::Result;
use reptime_lib::ctx;
use reptime_lib::measurement::Rusage;

/// Reaping a child process together with its resource usage.
///
/// [std::process::Child::wait] discards the accounting the kernel keeps for
/// the child, so the engine reaps through `wait4` instead. Works on targets
/// with the `wait4` syscall available.
pub trait WaitRusage {
    /// Block until the process exits; return its exit code and rusage.
    ///
    /// A child killed by a signal reports `128 + signo`, following shell
    /// convention.
    fn wait_rusage(&mut self) -> Result<(i32, Option<Rusage>)>;
}

impl WaitRusage for Child {
    fn wait_rusage(&mut self) -> Result<(i32, Option<Rusage>)> {
        let pid = self.id() as libc::pid_t;
        let mut status: libc::c_int = 0;

        // SAFETY: wait4 writes through the two raw pointers we hand it;
        // both point at locals that outlive the call.
        let mut raw: libc::rusage = unsafe { std::mem::zeroed() };
        let reaped = unsafe { libc::wait4(pid, addr_of_mut!(status), 0, addr_of_mut!(raw)) };

        if reaped != pid {
            return Err(io::Error::last_os_error()).with_context(ctx!(
                "Could not wait for the child process", ;
                "",
            ));
        }

        let code = if libc::WIFEXITED(status) {
            libc::WEXITSTATUS(status)
        } else if libc::WIFSIGNALED(status) {
            128 + libc::WTERMSIG(status)
        } else {
            // wait4 without WUNTRACED only returns terminated children.
            status
        };

        Ok((code, Some(rusage_from_raw(&raw))))
    }
}

/// Converts a `libc::rusage` to the portable [Rusage] snapshot.
fn rusage_from_raw(raw: &libc::rusage) -> Rusage {
    Rusage {
        utime: duration_from_timeval(raw.ru_utime),
        stime: duration_from_timeval(raw.ru_stime),
        maxrss: raw.ru_maxrss as usize,
        minflt: raw.ru_minflt as usize,
        majflt: raw.ru_majflt as usize,
        nswap: raw.ru_nswap as usize,
        inblock: raw.ru_inblock as usize,
        oublock: raw.ru_oublock as usize,
        msgsnd: raw.ru_msgsnd as usize,
        msgrcv: raw.ru_msgrcv as usize,
        nsignals: raw.ru_nsignals as usize,
        nvcsw: raw.ru_nvcsw as usize,
        nivcsw: raw.ru_nivcsw as usize,
    }
}

/// Converts a `libc::timeval` to a `std::time::Duration`.
fn duration_from_timeval(timeval: libc::timeval) -> Duration {
    Duration::new(timeval.tv_sec as u64, (timeval.tv_usec * 1000) as u32)
}
