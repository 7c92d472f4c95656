//! In-memory lookup fakes for stage tests.

use async_trait::async_trait;
use orbit_core::{DnsLookup, OrbitError, Result, WhoisLookup};
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Mutex;

/// Scripted DNS answers. Anything not scripted fails like a SERVFAIL.
#[derive(Default)]
pub struct FakeDns {
    pub forward: HashMap<String, Vec<IpAddr>>,
    pub reverse: HashMap<IpAddr, Vec<String>>,
    pub ds: HashMap<String, bool>,
    pub queries: Mutex<Vec<String>>,
}

impl FakeDns {
    pub fn forward(mut self, domain: &str, ips: &[&str]) -> Self {
        let ips = ips.iter().map(|ip| ip.parse().unwrap()).collect();
        self.forward.insert(domain.to_string(), ips);
        self
    }

    pub fn reverse(mut self, ip: &str, names: &[&str]) -> Self {
        let names = names.iter().map(|n| (*n).to_string()).collect();
        self.reverse.insert(ip.parse().unwrap(), names);
        self
    }

    pub fn ds(mut self, domain: &str, present: bool) -> Self {
        self.ds.insert(domain.to_string(), present);
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    fn log(&self, query: String) {
        self.queries.lock().unwrap().push(query);
    }
}

#[async_trait]
impl DnsLookup for FakeDns {
    async fn lookup_ip(&self, domain: &str) -> Result<Vec<IpAddr>> {
        self.log(format!("A {domain}"));
        self.forward
            .get(domain)
            .cloned()
            .ok_or_else(|| OrbitError::Dns(format!("{domain}: SERVFAIL")))
    }

    async fn reverse_lookup(&self, ip: IpAddr) -> Result<Vec<String>> {
        self.log(format!("PTR {ip}"));
        self.reverse
            .get(&ip)
            .cloned()
            .ok_or_else(|| OrbitError::Dns(format!("{ip}: SERVFAIL")))
    }

    async fn has_delegation_signer(&self, domain: &str) -> Result<bool> {
        self.log(format!("DS {domain}"));
        self.ds
            .get(domain)
            .copied()
            .ok_or_else(|| OrbitError::Dns(format!("{domain}: SERVFAIL")))
    }
}

/// Scripted WHOIS responses. Unscripted addresses fail.
#[derive(Default)]
pub struct FakeWhois {
    pub responses: HashMap<IpAddr, String>,
}

impl FakeWhois {
    pub fn respond(mut self, ip: &str, raw: &str) -> Self {
        self.responses.insert(ip.parse().unwrap(), raw.to_string());
        self
    }
}

#[async_trait]
impl WhoisLookup for FakeWhois {
    async fn whois(&self, ip: IpAddr) -> Result<String> {
        self.responses
            .get(&ip)
            .cloned()
            .ok_or_else(|| OrbitError::Whois(format!("{ip}: connection refused")))
    }
}
