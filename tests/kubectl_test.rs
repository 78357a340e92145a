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

#[cfg(test)]
mod tests {
    use kubesim::*;

    const NOW: i64 = 1_731_234_195_000;

    fn simulator() -> Simulator {
        Simulator::with_parts(
            Entropy::seeded(2024),
            Box::new(ManualClock::new(NOW)),
            &SimulatorConf::default(),
        )
    }

    fn ok(sim: &mut Simulator, line: &str) -> String {
        let out = sim.execute_command(line);
        assert!(!out.is_error, "`{}` failed: {}", line, out.output);
        out.output
    }

    fn err(sim: &mut Simulator, line: &str) -> String {
        let out = sim.execute_command(line);
        assert!(out.is_error, "`{}` unexpectedly succeeded: {}", line, out.output);
        out.output
    }

    /// First column of every data row.
    fn names(table: &str) -> Vec<String> {
        table
            .lines()
            .skip(1)
            .filter_map(|line| line.split_whitespace().next())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_create_namespace_scenario() {
        let mut sim = simulator();
        assert_eq!(ok(&mut sim, "kubectl create namespace demo"), "namespace/demo created");

        let table = ok(&mut sim, "kubectl get namespaces");
        assert!(table.lines().any(|line| line.starts_with("demo ")));
        assert_eq!(names(&table).iter().filter(|n| *n == "demo").count(), 1);

        let dup = err(&mut sim, "kubectl create ns demo");
        assert_eq!(
            dup,
            "Error from server (AlreadyExists): namespaces \"demo\" already exists"
        );
    }

    #[test]
    fn test_deployment_scale_scenario() {
        let mut sim = simulator();
        assert_eq!(
            ok(&mut sim, "kubectl create deployment web --image=nginx --replicas=3"),
            "deployment.apps/web created"
        );
        let web_pods = |sim: &mut Simulator| {
            names(&ok(sim, "kubectl get pods"))
                .into_iter()
                .filter(|n| n.starts_with("web-"))
                .count()
        };
        assert_eq!(web_pods(&mut sim), 3);

        assert_eq!(
            ok(&mut sim, "kubectl scale deployment web --replicas=1"),
            "deployment.apps/web scaled"
        );
        assert_eq!(web_pods(&mut sim), 1);

        ok(&mut sim, "kubectl scale deployment/web --replicas=4");
        assert_eq!(web_pods(&mut sim), 4);
        ok(&mut sim, "kubectl scale deployment/web --replicas=4");
        assert_eq!(web_pods(&mut sim), 4);

        let bad = err(&mut sim, "kubectl scale deployment web --replicas=many");
        assert_eq!(bad, "Error: --replicas is required and must be a number");
        assert_eq!(web_pods(&mut sim), 4);
    }

    #[test]
    fn test_owned_pod_names_carry_template_hash() {
        let mut sim = simulator();
        ok(&mut sim, "kubectl create deployment api --image=acme/api:1.0 --replicas=2");
        let state = sim.get_state();
        let deployment = state.deployments.iter().find(|d| d.name == "api").unwrap();
        for pod in state.pods.iter().filter(|p| p.namespace == "default" && p.name.starts_with("api-"))
        {
            let parts: Vec<&str> = pod.name.rsplitn(3, '-').collect();
            assert_eq!(parts.len(), 3);
            assert_eq!(parts[0].len(), 5);
            assert_eq!(parts[2], "api");
            assert_eq!(pod.template_hash.as_deref(), Some(parts[1]));
            assert_eq!(deployment.template_hash, parts[1]);
        }
    }

    #[test]
    fn test_protected_namespace_scenario() {
        let mut sim = simulator();
        let before = sim.get_state().namespaces.len();
        for name in ["default", "kube-system", "kube-public", "kube-node-lease"] {
            let out = err(&mut sim, &format!("kubectl delete namespace {}", name));
            assert!(out.contains(&format!("namespaces \"{}\" is forbidden", name)));
        }
        assert_eq!(sim.get_state().namespaces.len(), before);
    }

    #[test]
    fn test_not_found_scenario() {
        let mut sim = simulator();
        assert_eq!(
            err(&mut sim, "kubectl get pod ghost"),
            "Error from server (NotFound): pods \"ghost\" not found"
        );
        assert_eq!(
            err(&mut sim, "kubectl describe pod ghost"),
            "Error from server (NotFound): pods \"ghost\" not found"
        );
    }

    #[test]
    fn test_namespace_delete_cascades() {
        let mut sim = simulator();
        ok(&mut sim, "kubectl create namespace shop");
        ok(&mut sim, "kubectl create deployment cart --image=cart:1 --replicas=2 -n shop");
        ok(&mut sim, "kubectl create service cart --port=8080 -n shop");
        ok(&mut sim, "kubectl create pod debug --image=busybox -n shop");

        assert_eq!(ok(&mut sim, "kubectl delete namespace shop"), "namespace \"shop\" deleted");

        let state = sim.get_state();
        assert!(state.namespaces.iter().all(|ns| ns.name != "shop"));
        assert!(state.pods.iter().all(|p| p.namespace != "shop"));
        assert!(state.deployments.iter().all(|d| d.namespace != "shop"));
        assert!(state.services.iter().all(|s| s.namespace != "shop"));
        assert_eq!(
            ok(&mut sim, "kubectl get pods -n shop"),
            "No resources found in shop namespace."
        );
    }

    #[test]
    fn test_deleted_names_never_listed_again() {
        let mut sim = simulator();
        ok(&mut sim, "kubectl create pod scratch --image=busybox");
        assert_eq!(
            names(&ok(&mut sim, "kubectl get pods")).iter().filter(|n| *n == "scratch").count(),
            1
        );
        assert_eq!(ok(&mut sim, "kubectl delete pod scratch"), "pod \"scratch\" deleted");
        assert!(!names(&ok(&mut sim, "kubectl get pods")).contains(&"scratch".to_string()));

        ok(&mut sim, "kubectl delete deployment nginx-deployment");
        let listed = names(&ok(&mut sim, "kubectl get pods"));
        assert!(listed.iter().all(|n| !n.starts_with("nginx-deployment-")));
    }

    #[test]
    fn test_encodings_describe_same_set() {
        let mut sim = simulator();
        // -A puts NAMESPACE first
        let mut table: Vec<String> = ok(&mut sim, "kubectl get pods -A")
            .lines()
            .skip(1)
            .filter_map(|line| line.split_whitespace().nth(1))
            .map(str::to_string)
            .collect();
        table.sort();

        let json: serde_json::Value =
            serde_json::from_str(&ok(&mut sim, "kubectl get pods -A -o json")).unwrap();
        assert_eq!(json["kind"], "List");
        let mut from_json: Vec<String> = json["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["name"].as_str().unwrap().to_string())
            .collect();
        from_json.sort();

        let yaml = ok(&mut sim, "kubectl get pods -A -o yaml");
        let mut from_yaml: Vec<String> = yaml
            .lines()
            .filter_map(|line| line.trim_start().trim_start_matches("- ").strip_prefix("name: "))
            .map(str::to_string)
            .collect();
        from_yaml.sort();

        assert_eq!(table, from_json);
        assert_eq!(table, from_yaml);
    }

    #[test]
    fn test_table_column_offsets() {
        let mut sim = simulator();
        let pods = ok(&mut sim, "kubectl get pods");
        let header = pods.lines().next().unwrap();
        assert_eq!(header.find("READY"), Some(42));
        assert_eq!(header.find("STATUS"), Some(50));
        for row in pods.lines().skip(1) {
            assert_eq!(&row[42..43], "1");
        }

        let nodes = ok(&mut sim, "kubectl get nodes");
        assert_eq!(
            nodes.lines().next().unwrap(),
            "NAME     STATUS   ROLES           AGE   VERSION"
        );
        assert!(nodes.lines().nth(1).unwrap().starts_with("node-1   Ready    control-plane   45d"));
    }

    #[test]
    fn test_unknown_inputs() {
        let mut sim = simulator();
        assert_eq!(
            err(&mut sim, "kubectl get widgets"),
            "error: the server doesn't have a resource type \"widgets\""
        );
        assert_eq!(
            err(&mut sim, "kubectl frobnicate"),
            "error: unknown command \"frobnicate\" for \"kubectl\""
        );
        assert!(err(&mut sim, "kubectl get pods -o xml").starts_with(
            "error: unable to match a printer suitable for the output format \"xml\""
        ));
        assert!(err(&mut sim, "kubectl exec -it redis-master-0 -- sh").contains("not supported"));
    }

    #[test]
    fn test_rejected_commands_leave_state_untouched() {
        let mut sim = simulator();
        let before = sim.get_state();
        err(&mut sim, "kubectl create deployment nope");
        err(&mut sim, "kubectl create deployment web --image=nginx -n missing");
        err(&mut sim, "kubectl delete service ghost");
        err(&mut sim, "kubectl scale deployment ghost --replicas=2");
        assert_eq!(sim.get_state(), before);
    }
}
