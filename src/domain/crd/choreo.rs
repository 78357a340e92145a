// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The `choreo.dev` platform kinds installed by the control-plane chart.

use super::{CrdDescriptor, RegistryEntry};
use crate::domain::model::{CustomResource, ObjectMeta, Scope};
use crate::infrastructure::constants::{DEFAULT_NAMESPACE, MILLIS_PER_DAY};
use serde_json::{json, Value};
use std::collections::BTreeMap;

const GROUP: &str = "choreo.dev";
const VERSION: &str = "v1alpha1";
const API_VERSION: &str = "choreo.dev/v1alpha1";

const fn descriptor(
    kind: &'static str,
    plural: &'static str,
    singular: &'static str,
    scope: Scope,
    categories: &'static [&'static str],
) -> CrdDescriptor {
    CrdDescriptor {
        group: GROUP,
        version: VERSION,
        kind,
        plural,
        singular,
        scope,
        categories,
    }
}

pub(super) static REGISTRY: &[RegistryEntry] = &[
    RegistryEntry {
        descriptor: descriptor(
            "Organization",
            "organizations",
            "organization",
            Scope::Cluster,
            &["openchoreo"],
        ),
        samples: organizations,
    },
    RegistryEntry {
        descriptor: descriptor(
            "Project",
            "projects",
            "project",
            Scope::Namespaced,
            &["openchoreo"],
        ),
        samples: projects,
    },
    RegistryEntry {
        descriptor: descriptor(
            "Component",
            "components",
            "component",
            Scope::Namespaced,
            &["openchoreo"],
        ),
        samples: components,
    },
    RegistryEntry {
        descriptor: descriptor("Build", "builds", "build", Scope::Namespaced, &["openchoreo"]),
        samples: builds,
    },
    RegistryEntry {
        descriptor: descriptor(
            "DeployableArtifact",
            "deployableartifacts",
            "deployableartifact",
            Scope::Namespaced,
            &["openchoreo"],
        ),
        samples: deployable_artifacts,
    },
    RegistryEntry {
        descriptor: descriptor(
            "Environment",
            "environments",
            "environment",
            Scope::Namespaced,
            &["openchoreo"],
        ),
        samples: environments,
    },
    RegistryEntry {
        descriptor: descriptor(
            "ResourceType",
            "resourcetypes",
            "resourcetype",
            Scope::Cluster,
            &["openchoreo"],
        ),
        samples: resource_types,
    },
    RegistryEntry {
        descriptor: descriptor(
            "DataPlane",
            "dataplanes",
            "dataplane",
            Scope::Cluster,
            &["openchoreo", "infrastructure"],
        ),
        samples: data_planes,
    },
    RegistryEntry {
        descriptor: descriptor(
            "IdentityProvider",
            "idps",
            "idp",
            Scope::Cluster,
            &["openchoreo", "security"],
        ),
        samples: identity_providers,
    },
];

fn resource(
    kind: &str,
    name: &str,
    namespace: Option<&str>,
    created_ms: i64,
    spec: Value,
    status: Value,
) -> CustomResource {
    CustomResource {
        api_version: API_VERSION.to_string(),
        kind: kind.to_string(),
        metadata: ObjectMeta {
            name: name.to_string(),
            namespace: namespace.map(str::to_string),
            creation_timestamp: created_ms,
            annotations: BTreeMap::new(),
        },
        spec,
        status,
    }
}

fn days_ago(now_ms: i64, days: i64) -> i64 {
    now_ms - days * MILLIS_PER_DAY
}

fn organizations(_: Option<&str>, now: i64) -> Vec<CustomResource> {
    vec![
        resource(
            "Organization",
            "acme-corp",
            None,
            days_ago(now, 10),
            json!({
                "displayName": "ACME Corporation",
                "description": "Enterprise organization for ACME products"
            }),
            json!({ "phase": "Active" }),
        ),
        resource(
            "Organization",
            "demo-org",
            None,
            days_ago(now, 15),
            json!({
                "displayName": "Demo Organization",
                "description": "Sample organization for testing"
            }),
            json!({ "phase": "Active" }),
        ),
    ]
}

fn projects(namespace: Option<&str>, now: i64) -> Vec<CustomResource> {
    let ns = namespace.unwrap_or(DEFAULT_NAMESPACE);
    vec![
        resource(
            "Project",
            "web-app",
            Some(ns),
            days_ago(now, 8),
            json!({
                "displayName": "Web Application",
                "description": "Main customer-facing web application",
                "organizationRef": { "name": "acme-corp" }
            }),
            json!({ "phase": "Active" }),
        ),
        resource(
            "Project",
            "api-backend",
            Some(ns),
            days_ago(now, 7),
            json!({
                "displayName": "API Backend",
                "description": "REST API backend services",
                "organizationRef": { "name": "acme-corp" }
            }),
            json!({ "phase": "Active" }),
        ),
    ]
}

fn components(namespace: Option<&str>, now: i64) -> Vec<CustomResource> {
    let ns = namespace.unwrap_or(DEFAULT_NAMESPACE);
    vec![
        resource(
            "Component",
            "frontend",
            Some(ns),
            days_ago(now, 5),
            json!({
                "displayName": "Frontend UI",
                "description": "React-based frontend application",
                "projectRef": { "name": "web-app", "namespace": ns },
                "componentType": "web",
                "repository": "https://github.com/acme-corp/frontend"
            }),
            json!({ "phase": "Ready" }),
        ),
        resource(
            "Component",
            "user-service",
            Some(ns),
            days_ago(now, 5),
            json!({
                "displayName": "User Service",
                "description": "User management microservice",
                "projectRef": { "name": "api-backend", "namespace": ns },
                "componentType": "service",
                "repository": "https://github.com/acme-corp/user-service"
            }),
            json!({ "phase": "Ready" }),
        ),
    ]
}

fn builds(namespace: Option<&str>, now: i64) -> Vec<CustomResource> {
    let ns = namespace.unwrap_or(DEFAULT_NAMESPACE);
    vec![
        resource(
            "Build",
            "frontend-build-1",
            Some(ns),
            days_ago(now, 2),
            json!({
                "componentRef": { "name": "frontend", "namespace": ns },
                "gitCommit": "a1b2c3d",
                "buildType": "container"
            }),
            json!({ "phase": "Succeeded", "completedAt": days_ago(now, 2) }),
        ),
        resource(
            "Build",
            "user-service-build-2",
            Some(ns),
            days_ago(now, 1),
            json!({
                "componentRef": { "name": "user-service", "namespace": ns },
                "gitCommit": "e4f5g6h",
                "buildType": "container"
            }),
            json!({ "phase": "Succeeded", "completedAt": days_ago(now, 1) }),
        ),
    ]
}

fn deployable_artifacts(namespace: Option<&str>, now: i64) -> Vec<CustomResource> {
    let ns = namespace.unwrap_or(DEFAULT_NAMESPACE);
    vec![
        resource(
            "DeployableArtifact",
            "frontend-v1.2.0",
            Some(ns),
            days_ago(now, 1),
            json!({
                "buildRef": { "name": "frontend-build-1", "namespace": ns },
                "version": "v1.2.0",
                "imageRef": "acme/frontend:v1.2.0"
            }),
            json!({ "phase": "Available" }),
        ),
        resource(
            "DeployableArtifact",
            "user-service-v2.1.0",
            Some(ns),
            days_ago(now, 1),
            json!({
                "buildRef": { "name": "user-service-build-2", "namespace": ns },
                "version": "v2.1.0",
                "imageRef": "acme/user-service:v2.1.0"
            }),
            json!({ "phase": "Available" }),
        ),
    ]
}

fn environments(namespace: Option<&str>, now: i64) -> Vec<CustomResource> {
    let ns = namespace.unwrap_or(DEFAULT_NAMESPACE);
    let env = |name: &str, display: &str, description: &str, tier: &str, days: i64| {
        resource(
            "Environment",
            name,
            Some(ns),
            days_ago(now, days),
            json!({
                "displayName": display,
                "description": description,
                "projectRef": { "name": "web-app", "namespace": ns },
                "type": tier
            }),
            json!({ "phase": "Ready" }),
        )
    };
    vec![
        env("dev", "Development", "Development environment", "non-production", 12),
        env(
            "staging",
            "Staging",
            "Staging environment for testing",
            "non-production",
            10,
        ),
        env("production", "Production", "Production environment", "production", 10),
    ]
}

fn resource_types(_: Option<&str>, now: i64) -> Vec<CustomResource> {
    let rt = |name: &str, display: &str, description: &str, category: &str, provider: &str| {
        resource(
            "ResourceType",
            name,
            None,
            days_ago(now, 20),
            json!({
                "displayName": display,
                "description": description,
                "category": category,
                "provider": provider
            }),
            json!({ "phase": "Available" }),
        )
    };
    vec![
        rt(
            "postgres-db",
            "PostgreSQL Database",
            "Managed PostgreSQL database instance",
            "database",
            "aws-rds",
        ),
        rt(
            "redis-cache",
            "Redis Cache",
            "Managed Redis cache instance",
            "cache",
            "aws-elasticache",
        ),
        rt(
            "s3-bucket",
            "S3 Bucket",
            "AWS S3 object storage bucket",
            "storage",
            "aws-s3",
        ),
    ]
}

fn data_planes(_: Option<&str>, now: i64) -> Vec<CustomResource> {
    vec![resource(
        "DataPlane",
        "default-dp",
        None,
        days_ago(now, 15),
        json!({
            "displayName": "Default Data Plane",
            "description": "Primary data plane for application workloads",
            "region": "us-west-2",
            "clusterRef": { "name": "production-cluster" }
        }),
        json!({ "phase": "Ready", "health": "Healthy" }),
    )]
}

fn identity_providers(_: Option<&str>, now: i64) -> Vec<CustomResource> {
    vec![
        resource(
            "IdentityProvider",
            "corporate-sso",
            None,
            days_ago(now, 30),
            json!({
                "displayName": "Corporate SSO",
                "description": "SAML-based corporate identity provider",
                "type": "saml",
                "issuer": "https://sso.acme-corp.com"
            }),
            json!({ "phase": "Active", "connected": true }),
        ),
        resource(
            "IdentityProvider",
            "github-oauth",
            None,
            days_ago(now, 25),
            json!({
                "displayName": "GitHub OAuth",
                "description": "OAuth integration with GitHub",
                "type": "oauth2",
                "issuer": "https://github.com"
            }),
            json!({ "phase": "Active", "connected": true }),
        ),
    ]
}
