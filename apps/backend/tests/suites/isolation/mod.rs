mod gate_scenarios;
